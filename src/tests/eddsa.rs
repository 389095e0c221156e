// Copyright 2025 Simo Sorce
// See LICENSE.txt file for terms

use super::*;

use crate::ec::eddsa::generate_eddsa_keys;
use crate::ec::params::*;

fn ed25519_values() -> Vec<(u32, Vec<u8>)> {
    vec![
        (TEE_ATTR_ED25519_PRIVATE_VALUE, vec![0x44; 32]),
        (TEE_ATTR_ED25519_PUBLIC_VALUE, vec![0x55; 32]),
    ]
}

fn keygen() -> Mechanism {
    Mechanism::new(CKM_EC_EDWARDS_KEY_PAIR_GEN)
}

#[test]
fn test_eddsa_generation() {
    for params in [&ED25519_OID_DER[..], &ED25519_NAME_DER[..]] {
        let mut provider = FakeProvider::new(&ed25519_values());
        let (mut pubkey, mut privkey) =
            keypair_templates(CKK_EC_EDWARDS, params);
        privkey
            .add_attr(Attribute::from_bytes(CKA_EC_POINT, Vec::new()))
            .unwrap();

        generate_eddsa_keys(
            &mut provider,
            &keygen(),
            &mut pubkey,
            &mut privkey,
        )
        .unwrap();

        assert_eq!(provider.opened, 1);
        assert_eq!(provider.closed, 1);
        assert_eq!(provider.usage, Some(TEE_USAGE_EXTRACTABLE));
        let (obj_type, size, gen_params) = &provider.generated[0];
        assert_eq!(*obj_type, TEE_TYPE_ED25519_KEYPAIR);
        assert_eq!(*size, 256);
        assert!(gen_params.is_empty());

        assert_eq!(
            pubkey.get_attr_as_bytes(CKA_EC_POINT).unwrap(),
            &vec![0x55u8; 32]
        );
        assert_eq!(
            privkey.get_attr_as_bytes(CKA_EC_POINT).unwrap(),
            &vec![0x55u8; 32]
        );
        assert_eq!(
            privkey.get_attr_as_bytes(CKA_VALUE).unwrap(),
            &vec![0x44u8; 32]
        );
        assert_eq!(
            privkey.get_attr_as_bytes(CKA_EC_PARAMS).unwrap().as_slice(),
            params
        );
        assert!(privkey.get_attr(ECTA_HIDDEN_EC_POINT).is_none());
    }
}

#[test]
fn test_eddsa_generation_failures() {
    let steps = [
        FailAt::Allocate(ErrorKind::OutOfMemory),
        FailAt::Restrict,
        FailAt::Generate,
        FailAt::Read(TEE_ATTR_ED25519_PRIVATE_VALUE),
        FailAt::Read(TEE_ATTR_ED25519_PUBLIC_VALUE),
    ];
    for fail in steps {
        let mut provider = FakeProvider::failing(&ed25519_values(), fail);
        let (mut pubkey, mut privkey) =
            keypair_templates(CKK_EC_EDWARDS, &ED25519_OID_DER);
        let pub_before = snapshot(&pubkey);
        let priv_before = snapshot(&privkey);

        let ret = generate_eddsa_keys(
            &mut provider,
            &keygen(),
            &mut pubkey,
            &mut privkey,
        );
        assert_ne!(ret_rv(ret), CKR_OK);

        let opened = match fail {
            FailAt::Allocate(_) => 0,
            _ => 1,
        };
        assert_eq!(provider.opened, opened, "failure at {:?}", fail);
        assert_eq!(provider.closed, opened, "failure at {:?}", fail);
        assert_eq!(snapshot(&pubkey), pub_before);
        assert_eq!(snapshot(&privkey), priv_before);
    }
}

#[test]
fn test_eddsa_template_checks() {
    let mut provider = FakeProvider::new(&ed25519_values());

    /* a private point is an output for Edwards keys */
    let (mut pubkey, mut privkey) =
        keypair_templates(CKK_EC_EDWARDS, &ED25519_OID_DER);
    privkey
        .add_attr(Attribute::from_bytes(CKA_EC_POINT, vec![1; 32]))
        .unwrap();
    let ret = generate_eddsa_keys(
        &mut provider,
        &keygen(),
        &mut pubkey,
        &mut privkey,
    );
    assert_eq!(ret_rv(ret), CKR_TEMPLATE_INCONSISTENT);

    /* Weierstrass curve */
    let (mut pubkey, mut privkey) =
        keypair_templates(CKK_EC_EDWARDS, &P256_OID_DER);
    let ret = generate_eddsa_keys(
        &mut provider,
        &keygen(),
        &mut pubkey,
        &mut privkey,
    );
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* no EC_PARAMS */
    let (mut pubkey, mut privkey) = curveless_templates(CKK_EC_EDWARDS);
    let ret = generate_eddsa_keys(
        &mut provider,
        &keygen(),
        &mut pubkey,
        &mut privkey,
    );
    assert_eq!(ret_rv(ret), CKR_ATTRIBUTE_TYPE_INVALID);

    /* EC mechanism */
    let (mut pubkey, mut privkey) =
        keypair_templates(CKK_EC_EDWARDS, &ED25519_OID_DER);
    let mech = Mechanism::new(CKM_EC_KEY_PAIR_GEN);
    let ret =
        generate_eddsa_keys(&mut provider, &mech, &mut pubkey, &mut privkey);
    assert_eq!(ret_rv(ret), CKR_MECHANISM_INVALID);

    assert_eq!(provider.opened, 0);
}
