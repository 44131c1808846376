#![allow(missing_docs)]
use cipher_core::input::{
    AdfgvxInput, GcdInput, HillInput, InverseInput, KeyedInput, ModExpInput, MonoalphabeticInput,
    PlayfairInput, PowerInput, RailFenceInput, RawInput, RsaInput, SdesInput, VigenereInput,
    default_hill_matrix,
};
use cipher_core::request::{CipherKind, CipherRequest, Mode, MonoVariant, VigenereVariant};
use cipher_core::validate::{ValidationErrors, Validator, is_binary, parse_int};
use serde_json::json;

fn fields(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn rejected(input: RawInput) -> ValidationErrors {
    input.validate().expect_err("input should be rejected")
}

#[test]
fn test_validation_errors_dedup_and_order() {
    let mut errors = ValidationErrors::default();
    errors.push("b");
    errors.push("a");
    errors.push("b");
    assert_eq!(errors.messages(), &["b".to_string(), "a".to_string()]);
    assert_eq!(errors.to_string(), "b\na");
    assert_eq!(serde_json::to_value(&errors).unwrap(), json!(["b", "a"]));
}

#[test]
fn test_field_helpers() {
    assert_eq!(parse_int(" 42 "), Some(42));
    assert_eq!(parse_int("-7"), Some(-7));
    assert_eq!(parse_int("4.2"), None);
    assert_eq!(parse_int("12abc"), None);
    assert!(is_binary("0101", 4));
    assert!(!is_binary("0102", 4));
    assert!(!is_binary("010", 4));

    let mut v = Validator::new();
    assert_eq!(v.int_in_range("9", 1..=5, "out of range"), Some(9));
    v.non_empty("  ", "blank");
    let errors = v.finish().unwrap_err();
    assert_eq!(errors.messages(), &["out of range".to_string(), "blank".to_string()]);
}

#[test]
fn test_keyed_columnar_empty_keyword() {
    let errors = rejected(RawInput::KeyedColumnar(KeyedInput {
        text: "HELLO".into(),
        ..KeyedInput::default()
    }));
    assert!(errors.contains("Keyword cannot be empty"));
    assert!(errors.contains("Column order not set"));
}

#[test]
fn test_keyed_columnar_reports_all_failures() {
    let errors = rejected(RawInput::KeyedColumnar(KeyedInput {
        mode: Mode::Encrypt,
        text: "123".into(),
        keyword: "DATA".into(),
        column_order: fields(&["1", "1", "2"]),
    }));
    assert_eq!(
        errors.messages(),
        &[
            "Input text cannot be empty".to_string(),
            "Column order must have one entry per keyword letter".to_string(),
            "Column order must be a permutation of 1 to 3".to_string(),
        ]
    );
}

#[test]
fn test_keyed_columnar_payload() {
    let request = RawInput::KeyedColumnar(KeyedInput {
        mode: Mode::Decrypt,
        text: "tahd ta".into(),
        keyword: "data".into(),
        column_order: fields(&["3", "1", "4", "2"]),
    })
    .validate()
    .unwrap();
    assert_eq!(request.kind(), CipherKind::KeyedColumnar);
    assert_eq!(request.endpoint(), "/api/co1");
    assert_eq!(
        request.to_payload().unwrap(),
        json!({
            "cipher": "keyed",
            "mode": "decrypt",
            "keyword": "DATA",
            "columnOrder": [3, 1, 4, 2],
            "ciphertext": "TAHDTA"
        })
    );
}

#[test]
fn test_monoalphabetic_keys() {
    let errors = rejected(RawInput::Monoalphabetic(MonoalphabeticInput {
        variant: MonoVariant::Affine,
        text: "Hello".into(),
        key_a: "five".into(),
        key_b: "".into(),
        ..MonoalphabeticInput::default()
    }));
    assert_eq!(
        errors.messages(),
        &["Key a must be an integer".to_string(), "Key b must be an integer".to_string()]
    );

    let request = RawInput::Monoalphabetic(MonoalphabeticInput {
        variant: MonoVariant::Multiplicative,
        mode: Mode::Decrypt,
        text: "Hello, World".into(),
        key_k: " 7 ".into(),
        ..MonoalphabeticInput::default()
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({
            "cipher": "monoalphabetic",
            "plaintext": "Hello, World",
            "mode": "multiplicative",
            "operation": "decrypt",
            "key_k": 7
        })
    );
}

#[test]
fn test_playfair_normalizes_letters() {
    let request = RawInput::Playfair(PlayfairInput {
        plaintext: "hide the gold!".into(),
        keyword: "play fair".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({ "cipher": "playfair", "plaintext": "HIDETHEGOLD", "keyword": "PLAYFAIR" })
    );

    let errors = rejected(RawInput::Playfair(PlayfairInput::default()));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_rail_fence_bounds() {
    let too_many = rejected(RawInput::RailFence(RailFenceInput {
        text: "ABC".into(),
        rails: "4".into(),
        ..RailFenceInput::default()
    }));
    assert_eq!(
        too_many.messages(),
        &["Number of rails cannot exceed text length".to_string()]
    );

    let too_few = rejected(RawInput::RailFence(RailFenceInput {
        text: "ABC".into(),
        rails: "1".into(),
        ..RailFenceInput::default()
    }));
    assert!(too_few.contains("Number of rails must be at least 2"));

    let request = RawInput::RailFence(RailFenceInput {
        mode: Mode::Encrypt,
        text: "we are".into(),
        rails: "3".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({ "cipher": "rail_fence", "mode": "encrypt", "numRails": 3, "plaintext": "WEARE" })
    );
}

#[test]
fn test_vigenere_payload() {
    let request = RawInput::Vigenere(VigenereInput {
        variant: VigenereVariant::Autokey,
        mode: Mode::Encrypt,
        text: "attack at dawn".into(),
        key: "queen".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({
            "cipher": "vigenere",
            "mode": "encrypt",
            "cipherType": "autokey",
            "key": "QUEEN",
            "plaintext": "ATTACKATDAWN"
        })
    );
    let errors = rejected(RawInput::Vigenere(VigenereInput {
        text: "abc".into(),
        ..VigenereInput::default()
    }));
    assert_eq!(errors.messages(), &["Key cannot be empty".to_string()]);
}

#[test]
fn test_hill_length_and_matrix() {
    let errors = rejected(RawInput::Hill(HillInput {
        plaintext: "ACTS".into(),
        ..HillInput::default()
    }));
    assert_eq!(
        errors.messages(),
        &["Plaintext length must be a multiple of 3. Current length: 4".to_string()]
    );

    let mut input = HillInput::with_size(2);
    input.plaintext = "help".into();
    input.matrix[0][1] = "26".into();
    let errors = rejected(RawInput::Hill(input.clone()));
    assert!(errors.contains("Key matrix values must be integers from 0 to 25"));

    input.matrix[0][1] = "3".into();
    let request = RawInput::Hill(input).validate().unwrap();
    assert_eq!(request.endpoint(), "/api/hill");
    assert_eq!(
        request.to_payload().unwrap(),
        json!({ "plaintext": "HELP", "keyMatrix": [[1, 3], [0, 1]], "m": 2 })
    );
}

#[test]
fn test_hill_defaults() {
    assert_eq!(
        default_hill_matrix(3),
        vec![vec![6, 24, 1], vec![13, 16, 10], vec![20, 17, 15]]
    );
    assert_eq!(default_hill_matrix(2), vec![vec![1, 0], vec![0, 1]]);
    let errors = rejected(RawInput::Hill(HillInput {
        plaintext: "ABCDEF".into(),
        size: 6,
        matrix: Vec::new(),
    }));
    assert!(errors.contains("Matrix size must be between 2 and 5"));
    assert!(errors.contains("Key matrix must be 6×6"));
    assert!(default_hill_matrix(100_000).is_empty());
}

#[test]
fn test_hill_json_default_matrix_follows_size() {
    // 1. A 2×2 submission without a matrix gets the identity.
    let input: RawInput =
        serde_json::from_value(json!({ "cipher": "hill", "plaintext": "HELP", "size": 2 }))
            .unwrap();
    let payload = input.validate().unwrap().to_payload().unwrap();
    assert_eq!(
        payload,
        json!({ "plaintext": "HELP", "keyMatrix": [[1, 0], [0, 1]], "m": 2 })
    );

    // 2. Leaving out the size as well falls back to the classic 3×3 key.
    let input: RawInput =
        serde_json::from_value(json!({ "cipher": "hill", "plaintext": "ACT" })).unwrap();
    let payload = input.validate().unwrap().to_payload().unwrap();
    assert_eq!(
        payload["keyMatrix"],
        json!([[6, 24, 1], [13, 16, 10], [20, 17, 15]])
    );

    // 3. An explicit matrix wins over the default.
    let input: RawInput = serde_json::from_value(json!({
        "cipher": "hill",
        "plaintext": "HELP",
        "size": 2,
        "matrix": [["3", "3"], ["2", "5"]]
    }))
    .unwrap();
    let payload = input.validate().unwrap().to_payload().unwrap();
    assert_eq!(payload["keyMatrix"], json!([[3, 3], [2, 5]]));

    // 4. A huge order is rejected without building a matrix.
    let input: RawInput =
        serde_json::from_value(json!({ "cipher": "hill", "plaintext": "ABCD", "size": 100_000 }))
            .unwrap();
    let RawInput::Hill(hill) = &input else {
        panic!("expected a Hill input");
    };
    assert!(hill.matrix.is_empty());
    let errors = rejected(input);
    assert!(errors.contains("Matrix size must be between 2 and 5"));
}

#[test]
fn test_adfgvx_keeps_digits() {
    let errors = rejected(RawInput::Adfgvx(AdfgvxInput {
        text: "attack 1200".into(),
        ..AdfgvxInput::default()
    }));
    assert_eq!(errors.messages(), &["Please fill in all fields".to_string()]);

    let request = RawInput::Adfgvx(AdfgvxInput {
        mode: Mode::Encrypt,
        text: " attack 1200 ".into(),
        poly_key: "NA1C3H8TB2OME5WRPD4F6G7I9J0KLQSUVXYZ".into(),
        trans_key: "PRIVACY".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({
            "mode": "encrypt",
            "polyKey": "NA1C3H8TB2OME5WRPD4F6G7I9J0KLQSUVXYZ",
            "transKey": "PRIVACY",
            "plaintext": "attack 1200"
        })
    );
}

#[test]
fn test_rsa_rules() {
    let errors = rejected(RawInput::Rsa(RsaInput {
        p: "1".into(),
        q: "x".into(),
        e: "1".into(),
        m: "-1".into(),
    }));
    assert_eq!(
        errors.messages(),
        &[
            "p must be a prime number ≥ 2".to_string(),
            "q must be a prime number ≥ 2".to_string(),
            "e must be ≥ 2".to_string(),
            "Message m must be ≥ 0".to_string(),
        ]
    );
    let request = RawInput::Rsa(RsaInput {
        p: "61".into(),
        q: "53".into(),
        e: "17".into(),
        m: "65".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        request.to_payload().unwrap(),
        json!({ "p": 61, "q": 53, "e": 17, "m": 65 })
    );
}

#[test]
fn test_sdes_defaults_are_valid() {
    let request = RawInput::Sdes(SdesInput::default()).validate().unwrap();
    let payload = request.to_payload().unwrap();
    assert_eq!(payload["plaintext"], "10111101");
    assert_eq!(payload["key"], "1010000010");
    assert_eq!(payload["P10"], json!([3, 5, 2, 7, 4, 10, 1, 9, 8, 6]));
    assert_eq!(payload["P4"], json!([2, 4, 3, 1]));
    assert_eq!(payload["S0"][0], json!(["01", "00", "11", "10"]));
    assert!(payload.get("cipher").is_none());
}

#[test]
fn test_sdes_accumulates_failures() {
    let mut input = SdesInput {
        plaintext: "1011110".into(),
        key: "10100000102".into(),
        ..SdesInput::default()
    };
    input.p10[0] = "11".into();
    input.ep.pop();
    input.s1[2][3] = "2".into();
    let errors = rejected(RawInput::Sdes(input));
    assert_eq!(
        errors.messages(),
        &[
            "Plaintext must be exactly 8 binary digits (0 or 1)".to_string(),
            "Key must be exactly 10 binary digits (0 or 1)".to_string(),
            "P10 values must be numbers from 1 to 10".to_string(),
            "EP must have 8 entries".to_string(),
            "S1 box values must be 2-bit binary (e.g., 00, 01, 10, 11)".to_string(),
        ]
    );
}

#[test]
fn test_number_theory_requests() {
    let euler = RawInput::Euler(PowerInput {
        base: "3".into(),
        exponent: "200".into(),
        modulus: "13".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(euler.endpoint(), "/api/euler");
    assert_eq!(
        euler.to_payload().unwrap(),
        json!({ "base": 3, "exponent": 200, "modulus": 13 })
    );

    let fermat = RawInput::Fermat(PowerInput {
        base: "2".into(),
        exponent: "100".into(),
        modulus: "7".into(),
    })
    .validate()
    .unwrap();
    assert!(matches!(fermat, CipherRequest::Fermat(_)));
    assert_eq!(
        fermat.to_payload().unwrap(),
        json!({ "operation": "fermat", "base": 2, "exponent": 100, "modulus": 7 })
    );

    let inverse = RawInput::ExtendedEuclidean(InverseInput {
        a: "3".into(),
        m: "11".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(
        inverse.to_payload().unwrap(),
        json!({ "operation": "extended-euclidean", "a": 3, "m": 11 })
    );

    let mod_exp = RawInput::ModExp(ModExpInput {
        a: "4".into(),
        n: "13".into(),
        m: "497".into(),
    })
    .validate()
    .unwrap();
    assert_eq!(mod_exp.endpoint(), "/api/math-ops");
    assert_eq!(
        mod_exp.to_payload().unwrap(),
        json!({ "operation": "mod-exp", "a": 4, "n": 13, "m": 497 })
    );
}

#[test]
fn test_number_theory_rejections() {
    let gcd = rejected(RawInput::Gcd(GcdInput {
        a: "0".into(),
        b: "-4".into(),
    }));
    assert_eq!(
        gcd.messages(),
        &["Please enter valid positive integers for a and b".to_string()]
    );
    let power = rejected(RawInput::Euler(PowerInput {
        base: "2".into(),
        exponent: "3".into(),
        modulus: "0".into(),
    }));
    assert_eq!(power.messages(), &["Please enter valid values".to_string()]);
    let mod_exp = rejected(RawInput::ModExp(ModExpInput {
        a: "2".into(),
        n: "-1".into(),
        m: "5".into(),
    }));
    assert_eq!(mod_exp.len(), 1);
}

#[test]
fn test_raw_input_from_json() {
    let input: RawInput = serde_json::from_value(json!({
        "cipher": "rail-fence",
        "mode": "decrypt",
        "text": "WECRLTEERDSOEEFEAOCAIVDEN",
        "rails": "3"
    }))
    .unwrap();
    assert_eq!(input.kind(), CipherKind::RailFence);
    let payload = input.validate().unwrap().to_payload().unwrap();
    assert_eq!(payload["ciphertext"], "WECRLTEERDSOEEFEAOCAIVDEN");

    let sdes: RawInput = serde_json::from_value(json!({ "cipher": "sdes" })).unwrap();
    assert!(sdes.validate().is_ok());
}
