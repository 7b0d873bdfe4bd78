use ntt_rsa::{Engine, Error, NttRsa, Rsa2048, Rsa4096, RsaProfile};
use rand::Rng;
use rug::{integer::Order, Integer};

fn random_bits(rng: &mut impl Rng, bits: usize) -> Integer {
    let words: Vec<u64> = (0..bits.div_ceil(64)).map(|_| rng.random()).collect();
    let mut a = Integer::from_digits(&words, Order::Lsf);
    a.keep_bits_mut(bits as u32);
    a
}

fn random_odd_modulus(rng: &mut impl Rng, bits: usize) -> Integer {
    let mut p = random_bits(rng, bits);
    p.set_bit(bits as u32 - 1, true);
    p.set_bit(0, true);
    p
}

fn public_matches_pow_mod<P: RsaProfile>() {
    let mut rng = rand::rng();
    let engine = Engine::<P>::new();
    let p = random_odd_modulus(&mut rng, P::N);
    let ctx = engine.build_context(&p).unwrap();

    for e in [1u64, 2, 3, 17, 65537, u32::MAX as u64] {
        let a = random_bits(&mut rng, P::N) % &p;
        let e = Integer::from(e);
        let expected = a.clone().pow_mod(&e, &p).unwrap();
        assert_eq!(engine.modexp_public(&ctx, &a, &e).unwrap(), expected);
    }
}

#[test]
fn public_matches_pow_mod_2048() {
    public_matches_pow_mod::<Rsa2048>();
}

#[test]
fn public_matches_pow_mod_4096() {
    public_matches_pow_mod::<Rsa4096>();
}

#[test]
fn public_zero_exponent_short_circuits() {
    let mut rng = rand::rng();
    let engine = Engine::<Rsa2048>::new();
    let p = random_odd_modulus(&mut rng, 2048);
    let ctx = engine.build_context(&p).unwrap();

    let a = random_bits(&mut rng, 2048) % &p;
    assert_eq!(
        engine.modexp_public(&ctx, &a, &Integer::new()).unwrap(),
        1u32
    );
}

#[test]
fn public_exponent_range_enforced() {
    let engine = Engine::<Rsa2048>::new();
    let p = Integer::from(Integer::from(1) << 2047u32) | 0x329u32;
    let ctx = engine.build_context(&p).unwrap();
    let a = Integer::from(2);

    assert_eq!(
        engine
            .modexp_public(&ctx, &a, &Integer::from(1u64 << 32))
            .err(),
        Some(Error::ExponentOutOfRange)
    );
    assert_eq!(
        engine.modexp_public(&ctx, &a, &Integer::from(-1)).err(),
        Some(Error::ExponentOutOfRange)
    );
    // Largest admissible exponent.
    let e = Integer::from(u32::MAX);
    let expected = a.clone().pow_mod(&e, &p).unwrap();
    assert_eq!(engine.modexp_public(&ctx, &a, &e).unwrap(), expected);
}

#[test]
fn private_matches_pow_mod() {
    let mut rng = rand::rng();
    let engine = Engine::<Rsa2048>::new();
    let p = random_odd_modulus(&mut rng, 2048);
    let ctx = engine.build_context(&p).unwrap();

    let a = random_bits(&mut rng, 2048) % &p;
    let d = random_bits(&mut rng, 2048);
    let expected = a.clone().pow_mod(&d, &p).unwrap();
    assert_eq!(engine.modexp_private(&ctx, &a, &d).unwrap(), expected);
}

#[test]
fn private_exponent_range_enforced() {
    let engine = Engine::<Rsa2048>::new();
    let p = Integer::from(Integer::from(1) << 2047u32) | 0x329u32;
    let ctx = engine.build_context(&p).unwrap();
    let a = Integer::from(2);

    let too_wide = Integer::from(Integer::from(1) << 2048u32);
    assert_eq!(
        engine.modexp_private(&ctx, &a, &too_wide).err(),
        Some(Error::ExponentOutOfRange)
    );
    assert_eq!(
        engine.modexp_private(&ctx, &a, &Integer::from(-2)).err(),
        Some(Error::ExponentOutOfRange)
    );
}

#[test]
fn rsa_roundtrip_small_prime_pair() {
    // Tiny RSA keypair over 2048-bit arithmetic: encrypt with e, decrypt
    // with d, both through the front door.
    let mut rng = rand::rng();

    // p, q primes with gcd(e, p-1) = gcd(e, q-1) = 1.
    let e = Integer::from(65537u32);
    let mut prime = || loop {
        let c = random_bits(&mut rng, 1024).next_prime();
        if Integer::from(&c - 1u32) % &e != 0u32 {
            return c;
        }
    };
    let p = prime();
    let q = prime();
    let n = Integer::from(&p * &q);
    let phi = Integer::from(&p - 1u32) * Integer::from(&q - 1u32);
    let d = e.clone().invert(&phi).unwrap();

    let mut rsa = NttRsa::<Rsa2048>::new();
    rsa.set_modulus(&n).unwrap();

    let msg = random_bits(&mut rng, 1000);
    let cipher = rsa.modexp_public(&msg, &e).unwrap();
    assert_eq!(cipher, msg.clone().pow_mod(&e, &n).unwrap());

    let plain = rsa.modexp_private(&cipher, &d).unwrap();
    assert_eq!(plain, msg);
}
