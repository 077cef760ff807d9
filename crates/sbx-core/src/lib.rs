pub mod codec;
pub mod config;
pub mod error;

pub use codec::{Base64Codec, ByteCodec, TransportCodec, Utf8Codec};
pub use error::{SbxError, SbxResult};
