use sbx_crypto::layout::tags_match;
use sbx_crypto::{
    AesHmacEnvelope, BcryptHasher, CryptProvider, DecryptProvider, HashProvider, Sha256Hasher,
    TAG_SIZE,
};

const CRYPT_KEY: &str = "3cF*h:8%|kUQDz,{8d!{^WZ5WiqS>E1g";
const AUTH_KEY: &str = "nOk(o$QIL!Y_SNHLb<i~4vL<rsa0YB1w";

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

fn make_text(size: usize) -> String {
    "lorem ipsum ".chars().cycle().take(size).collect()
}

fn envelope() -> AesHmacEnvelope {
    AesHmacEnvelope::new(CRYPT_KEY, AUTH_KEY).unwrap()
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_seal(bencher: divan::Bencher, size: usize) {
    let env = envelope();
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| env.seal(divan::black_box(&data)).unwrap());
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_open(bencher: divan::Bencher, size: usize) {
    let env = envelope();
    let sealed = env.seal(&make_data(size)).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| env.open(divan::black_box(&sealed)).unwrap());
}

#[divan::bench(args = [1024, 65536])]
fn bench_crypt_decrypt_text(bencher: divan::Bencher, size: usize) {
    let env = envelope();
    let text = make_text(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| {
            let cipher_text = env.crypt(divan::black_box(&text)).unwrap();
            env.decrypt(&cipher_text).unwrap()
        });
}

/// Rejection cost should not depend on where the forged tag diverges.
#[divan::bench(args = [0, TAG_SIZE / 2, TAG_SIZE - 1])]
fn bench_tag_mismatch_at(bencher: divan::Bencher, position: usize) {
    let expected = [0x5Au8; TAG_SIZE];
    let mut forged = expected;
    forged[position] ^= 0xFF;
    bencher.bench(|| tags_match(divan::black_box(&expected), divan::black_box(&forged)));
}

#[divan::bench]
fn bench_sha256_hash(bencher: divan::Bencher) {
    let hasher = Sha256Hasher::new();
    let text = make_text(1024);
    bencher.bench(|| hasher.hash(divan::black_box(&text)).unwrap());
}

#[divan::bench(args = [4, 8])]
fn bench_bcrypt_hash(bencher: divan::Bencher, work_factor: u32) {
    let hasher = BcryptHasher::new(work_factor).unwrap();
    bencher.bench(|| hasher.hash(divan::black_box("correct horse")).unwrap());
}

fn main() {
    divan::main();
}
