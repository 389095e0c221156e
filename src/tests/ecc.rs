// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use super::*;

use crate::config::Config;
use crate::ec::ecdsa::generate_ec_keys;
use crate::ec::params::*;
use crate::ec::point::decode_ec_point;

fn p256_values() -> Vec<(u32, Vec<u8>)> {
    vec![
        (TEE_ATTR_ECC_PRIVATE_VALUE, vec![0x11; 32]),
        /* leading zero dropped by the provider */
        (TEE_ATTR_ECC_PUBLIC_VALUE_X, vec![0x22; 31]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_Y, vec![0x33; 32]),
    ]
}

fn keygen() -> Mechanism {
    Mechanism::new(CKM_EC_KEY_PAIR_GEN)
}

#[test]
fn test_ec_generation() {
    let mut provider = FakeProvider::new(&p256_values());
    let (mut pubkey, mut privkey) =
        keypair_templates(CKK_EC, &P256_EXPLICIT_DER);

    generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey)
        .unwrap();

    assert_eq!(provider.opened, 1);
    assert_eq!(provider.closed, 1);
    assert_eq!(provider.live_objects(), 0);
    assert_eq!(provider.usage, Some(TEE_USAGE_EXTRACTABLE));
    let (obj_type, size, params) = &provider.generated[0];
    assert_eq!(*obj_type, TEE_TYPE_ECDSA_KEYPAIR);
    assert_eq!(*size, 256);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].id(), TEE_ATTR_ECC_CURVE);
    assert_eq!(params[0].value_a(), Some(TEE_ECC_CURVE_NIST_P256));

    let point = pubkey.get_attr_as_bytes(CKA_EC_POINT).unwrap().clone();
    assert_eq!(point.len(), 2 + 65);
    let (x, y) = decode_ec_point(256, &point).unwrap();
    assert_eq!(x[0], 0);
    assert_eq!(&x[1..], &[0x22; 31]);
    assert_eq!(y, &[0x33; 32]);

    assert_eq!(
        privkey.get_attr_as_bytes(ECTA_HIDDEN_EC_POINT).unwrap(),
        &point
    );
    assert_eq!(
        privkey.get_attr_as_bytes(CKA_VALUE).unwrap(),
        &vec![0x11u8; 32]
    );
    assert_eq!(
        privkey.get_attr_as_bytes(CKA_EC_PARAMS).unwrap().as_slice(),
        &P256_EXPLICIT_DER
    );
    /* no point on the standard attribute of the private key */
    assert!(privkey.get_attr(CKA_EC_POINT).is_none());

    /* placeholders were replaced, not duplicated */
    let count = |obj: &Object, t: CK_ATTRIBUTE_TYPE| {
        obj.get_attributes()
            .iter()
            .filter(|a| a.get_type() == t)
            .count()
    };
    assert_eq!(count(&pubkey, CKA_EC_POINT), 1);
    assert_eq!(count(&privkey, CKA_EC_PARAMS), 1);
    assert_eq!(count(&privkey, CKA_VALUE), 1);
    assert_eq!(privkey.key_bit_size(), 256);
}

#[test]
fn test_ec_generation_p521() {
    let values = vec![
        (TEE_ATTR_ECC_PRIVATE_VALUE, vec![0x01; 65]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_X, vec![0x01; 66]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_Y, vec![0x01]),
    ];
    let mut provider = FakeProvider::new(&values);
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P521_OID_DER);

    generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey)
        .unwrap();

    /* one octet long form length */
    let point = pubkey.get_attr_as_bytes(CKA_EC_POINT).unwrap();
    assert_eq!(&point[..4], &[0x04, 0x81, 0x85, 0x04]);
    assert_eq!(point.len(), 3 + 133);
    assert_eq!(point[point.len() - 1], 0x01);
    assert_eq!(point[point.len() - 2], 0x00);
    assert_eq!(provider.generated[0].1, 521);
}

#[test]
fn test_ec_generation_failures() {
    let steps = [
        (FailAt::Allocate(ErrorKind::OutOfMemory), 0, CKR_DEVICE_MEMORY),
        (FailAt::Allocate(ErrorKind::NotSupported), 0, CKR_GENERAL_ERROR),
        (FailAt::Restrict, 1, CKR_GENERAL_ERROR),
        (FailAt::Generate, 1, CKR_ARGUMENTS_BAD),
        (FailAt::Read(TEE_ATTR_ECC_PRIVATE_VALUE), 1, CKR_GENERAL_ERROR),
        (FailAt::Read(TEE_ATTR_ECC_PUBLIC_VALUE_X), 1, CKR_GENERAL_ERROR),
        (FailAt::Read(TEE_ATTR_ECC_PUBLIC_VALUE_Y), 1, CKR_GENERAL_ERROR),
    ];
    for (fail, opened, rv) in steps {
        let mut provider = FakeProvider::failing(&p256_values(), fail);
        let (mut pubkey, mut privkey) =
            keypair_templates(CKK_EC, &P256_OID_DER);
        let pub_before = snapshot(&pubkey);
        let priv_before = snapshot(&privkey);

        let ret = generate_ec_keys(
            &mut provider,
            &keygen(),
            &mut pubkey,
            &mut privkey,
        );
        assert_eq!(ret_rv(ret), rv, "failure at {:?}", fail);

        assert_eq!(provider.opened, opened, "failure at {:?}", fail);
        assert_eq!(provider.closed, opened, "failure at {:?}", fail);
        assert_eq!(provider.live_objects(), 0);
        assert_eq!(snapshot(&pubkey), pub_before);
        assert_eq!(snapshot(&privkey), priv_before);
    }
}

#[test]
fn test_ec_bad_provider_coordinates() {
    /* coordinates wider than the curve */
    let values = vec![
        (TEE_ATTR_ECC_PRIVATE_VALUE, vec![0x11; 32]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_X, vec![0x22; 33]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_Y, vec![0x33; 32]),
    ];
    let mut provider = FakeProvider::new(&values);
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_GENERAL_ERROR);
    assert_eq!(provider.closed, 1);
    assert!(!pubkey.has_nonempty_attr(CKA_EC_POINT));
    assert!(!privkey.has_nonempty_attr(CKA_VALUE));

    /* empty coordinate */
    let values = vec![
        (TEE_ATTR_ECC_PRIVATE_VALUE, vec![0x11; 32]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_X, vec![]),
        (TEE_ATTR_ECC_PUBLIC_VALUE_Y, vec![0x33; 32]),
    ];
    let mut provider = FakeProvider::new(&values);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_GENERAL_ERROR);
    assert_eq!(provider.closed, 1);
}

#[test]
fn test_ec_template_inconsistent() {
    let mut provider = FakeProvider::new(&p256_values());

    /* public point already set */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    pubkey
        .set_attr(Attribute::from_bytes(CKA_EC_POINT, vec![4, 1, 0]))
        .unwrap();
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_TEMPLATE_INCONSISTENT);

    /* private value already set */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    privkey
        .set_attr(Attribute::from_bytes(CKA_VALUE, vec![1]))
        .unwrap();
    let priv_before = snapshot(&privkey);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_TEMPLATE_INCONSISTENT);
    /* placeholders are left alone */
    assert_eq!(snapshot(&privkey), priv_before);

    /* private params already set */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    privkey
        .set_attr(Attribute::from_bytes(CKA_EC_PARAMS, P256_OID_DER.to_vec()))
        .unwrap();
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_TEMPLATE_INCONSISTENT);

    assert_eq!(provider.opened, 0);
}

#[test]
fn test_ec_params_errors() {
    let mut provider = FakeProvider::new(&p256_values());

    /* no EC_PARAMS */
    let (mut pubkey, mut privkey) = curveless_templates(CKK_EC);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* empty EC_PARAMS */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &[]);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* truncated OID */
    let (mut pubkey, mut privkey) =
        keypair_templates(CKK_EC, &P256_OID_DER[..9]);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* Edwards curve */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &ED25519_OID_DER);
    let ret =
        generate_ec_keys(&mut provider, &keygen(), &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* wrong mechanism */
    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    let mech = Mechanism::new(CKM_EC_EDWARDS_KEY_PAIR_GEN);
    let ret = generate_ec_keys(&mut provider, &mech, &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_MECHANISM_INVALID);

    assert_eq!(provider.opened, 0);
}

#[test]
fn test_generate_key_pair_dispatch() {
    let mut provider = FakeProvider::new(&p256_values());
    let config =
        Config::from_toml("[ec]\ncurves = [\"secp384r1\"]\n").unwrap();

    let (mut pubkey, mut privkey) = keypair_templates(CKK_EC, &P256_OID_DER);
    let ret = generate_key_pair(
        &mut provider,
        &config,
        &keygen(),
        &mut pubkey,
        &mut privkey,
    );
    assert_eq!(ret_rv(ret), CKR_CURVE_NOT_SUPPORTED);
    assert_eq!(provider.opened, 0);

    let ret = generate_key_pair(
        &mut provider,
        &config,
        &Mechanism::new(CKM_ECDSA),
        &mut pubkey,
        &mut privkey,
    );
    assert_eq!(ret_rv(ret), CKR_MECHANISM_INVALID);

    let config = Config::new();
    generate_key_pair(
        &mut provider,
        &config,
        &keygen(),
        &mut pubkey,
        &mut privkey,
    )
    .unwrap();
    for key in [&pubkey, &privkey] {
        assert!(is_set(key, CKA_LOCAL));
        assert_eq!(
            key.get_attr_as_ulong(CKA_KEY_GEN_MECHANISM).unwrap(),
            CKM_EC_KEY_PAIR_GEN
        );
    }
    assert_eq!(provider.opened, 1);
    assert_eq!(provider.closed, 1);
}
