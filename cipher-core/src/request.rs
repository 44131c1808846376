// File:    request.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Request payloads sent to the computation service, one variant per cipher kind.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Computation service requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a submission encrypts or decrypts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plaintext in, ciphertext out.
    #[default]
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// The input text of a request, tagged by which side of the cipher it is on.
///
/// Serializes as a single `plaintext` or `ciphertext` field, so exactly one of
/// the two is ever sent.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Message {
    /// Text to encrypt.
    Plaintext(String),
    /// Text to decrypt.
    Ciphertext(String),
}

impl Message {
    /// Wraps `text` as plaintext or ciphertext depending on `mode`.
    #[must_use]
    pub const fn for_mode(mode: Mode, text: String) -> Self {
        match mode {
            Mode::Encrypt => Self::Plaintext(text),
            Mode::Decrypt => Self::Ciphertext(text),
        }
    }

    /// The wrapped text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plaintext(text) | Self::Ciphertext(text) => text,
        }
    }
}

/// Every cipher or number-theory page the workbench offers.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum CipherKind {
    /// Keyword-ordered columnar transposition.
    KeyedColumnar,
    /// Additive, multiplicative and affine substitution.
    Monoalphabetic,
    /// Playfair digraph substitution.
    Playfair,
    /// Hill matrix cipher.
    Hill,
    /// Rail fence transposition.
    RailFence,
    /// Vigenère and autokey polyalphabetic substitution.
    Vigenere,
    /// ADFGVX fractionation cipher.
    Adfgvx,
    /// Textbook RSA.
    Rsa,
    /// Simplified DES.
    Sdes,
    /// Euler's theorem modular exponentiation.
    Euler,
    /// Extended Euclidean modular inverse.
    ExtendedEuclidean,
    /// Euclidean greatest common divisor.
    Gcd,
    /// Square-and-multiply modular exponentiation.
    ModExp,
    /// Fermat's little theorem reduction.
    Fermat,
}

impl CipherKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 14] = [
        Self::KeyedColumnar,
        Self::Monoalphabetic,
        Self::Playfair,
        Self::Hill,
        Self::RailFence,
        Self::Vigenere,
        Self::Adfgvx,
        Self::Rsa,
        Self::Sdes,
        Self::Euler,
        Self::ExtendedEuclidean,
        Self::Gcd,
        Self::ModExp,
        Self::Fermat,
    ];

    /// The kebab-case name used in submissions and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyedColumnar => "keyed-columnar",
            Self::Monoalphabetic => "monoalphabetic",
            Self::Playfair => "playfair",
            Self::Hill => "hill",
            Self::RailFence => "rail-fence",
            Self::Vigenere => "vigenere",
            Self::Adfgvx => "adfgvx",
            Self::Rsa => "rsa",
            Self::Sdes => "sdes",
            Self::Euler => "euler",
            Self::ExtendedEuclidean => "extended-euclidean",
            Self::Gcd => "gcd",
            Self::ModExp => "mod-exp",
            Self::Fermat => "fermat",
        }
    }

    /// The service path this kind is posted to.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::KeyedColumnar
            | Self::Monoalphabetic
            | Self::Playfair
            | Self::RailFence
            | Self::Vigenere => "/api/co1",
            Self::Hill => "/api/hill",
            Self::Adfgvx => "/api/adfgvx",
            Self::Rsa => "/api/rsa",
            Self::Sdes => "/api/sdes",
            Self::Euler => "/api/euler",
            Self::ExtendedEuclidean | Self::Gcd | Self::ModExp | Self::Fermat => "/api/math-ops",
        }
    }

    /// The discriminator field a shared endpoint uses to pick the algorithm.
    #[must_use]
    pub const fn wire_tag(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::KeyedColumnar => Some(("cipher", "keyed")),
            Self::Monoalphabetic => Some(("cipher", "monoalphabetic")),
            Self::Playfair => Some(("cipher", "playfair")),
            Self::RailFence => Some(("cipher", "rail_fence")),
            Self::Vigenere => Some(("cipher", "vigenere")),
            Self::ExtendedEuclidean => Some(("operation", "extended-euclidean")),
            Self::Gcd => Some(("operation", "gcd")),
            Self::ModExp => Some(("operation", "mod-exp")),
            Self::Fermat => Some(("operation", "fermat")),
            Self::Hill | Self::Adfgvx | Self::Rsa | Self::Sdes | Self::Euler => None,
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three monoalphabetic substitution families.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MonoVariant {
    /// `E(x) = x + k`.
    #[default]
    Additive,
    /// `E(x) = x * k`.
    Multiplicative,
    /// `E(x) = a * x + b`.
    Affine,
}

/// Plain Vigenère or its autokey variant.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VigenereVariant {
    /// Repeating key.
    #[default]
    Vigenere,
    /// Key followed by the plaintext itself.
    Autokey,
}

/// Keyed columnar transposition fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyedRequest {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Normalized keyword.
    pub keyword: String,
    /// Read position per keyword column.
    pub column_order: Vec<usize>,
    /// The text to transform.
    #[serde(flatten)]
    pub message: Message,
}

/// Monoalphabetic substitution fields.
///
/// The service names the substitution family `mode` and the direction `operation`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MonoalphabeticRequest {
    /// The input text, sent as `plaintext` in both directions.
    pub plaintext: String,
    /// Substitution family.
    #[serde(rename = "mode")]
    pub variant: MonoVariant,
    /// Encrypt or decrypt.
    #[serde(rename = "operation")]
    pub mode: Mode,
    /// Additive or multiplicative key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_k: Option<i64>,
    /// Affine multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_a: Option<i64>,
    /// Affine shift.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_b: Option<i64>,
}

/// Playfair fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayfairRequest {
    /// Text to encrypt.
    pub plaintext: String,
    /// Square keyword.
    pub keyword: String,
}

/// Rail fence fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RailFenceRequest {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Number of rails.
    pub num_rails: i64,
    /// The text to transform.
    #[serde(flatten)]
    pub message: Message,
}

/// Vigenère and autokey fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VigenereRequest {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Which key schedule to use.
    pub cipher_type: VigenereVariant,
    /// The key.
    pub key: String,
    /// The text to transform.
    #[serde(flatten)]
    pub message: Message,
}

/// Hill cipher fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HillRequest {
    /// Text to encrypt; its length is a multiple of `m`.
    pub plaintext: String,
    /// The `m`×`m` key matrix.
    pub key_matrix: Vec<Vec<i64>>,
    /// Matrix order.
    pub m: usize,
}

/// ADFGVX fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdfgvxRequest {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Polybius square keyword.
    pub poly_key: String,
    /// Transposition keyword.
    pub trans_key: String,
    /// The text to transform.
    #[serde(flatten)]
    pub message: Message,
}

/// RSA fields.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaRequest {
    /// First prime.
    pub p: i64,
    /// Second prime.
    pub q: i64,
    /// Public exponent.
    pub e: i64,
    /// Message.
    pub m: i64,
}

/// Simplified DES fields.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SdesRequest {
    /// 8-bit block.
    pub plaintext: String,
    /// 10-bit key.
    pub key: String,
    /// Key permutation P10.
    #[serde(rename = "P10")]
    pub p10: Vec<i64>,
    /// Subkey selection P8.
    #[serde(rename = "P8")]
    pub p8: Vec<i64>,
    /// Initial permutation.
    #[serde(rename = "IP")]
    pub ip: Vec<i64>,
    /// Expansion permutation.
    #[serde(rename = "EP")]
    pub ep: Vec<i64>,
    /// Round permutation P4.
    #[serde(rename = "P4")]
    pub p4: Vec<i64>,
    /// First substitution box.
    #[serde(rename = "S0")]
    pub s0: Vec<Vec<String>>,
    /// Second substitution box.
    #[serde(rename = "S1")]
    pub s1: Vec<Vec<String>>,
}

/// Fields of the `base^exponent mod modulus` operations (Euler, Fermat).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerRequest {
    /// Base.
    pub base: i64,
    /// Exponent.
    pub exponent: i64,
    /// Modulus.
    pub modulus: i64,
}

/// Extended Euclidean fields.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseRequest {
    /// Value to invert.
    pub a: i64,
    /// Modulus.
    pub m: i64,
}

/// GCD fields.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcdRequest {
    /// First operand.
    pub a: i64,
    /// Second operand.
    pub b: i64,
}

/// Modular exponentiation fields, `a^n mod m`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModExpRequest {
    /// Base.
    pub a: i64,
    /// Exponent.
    pub n: i64,
    /// Modulus.
    pub m: i64,
}

/// A validated request for the computation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherRequest {
    /// Keyed columnar transposition.
    KeyedColumnar(KeyedRequest),
    /// Monoalphabetic substitution.
    Monoalphabetic(MonoalphabeticRequest),
    /// Playfair.
    Playfair(PlayfairRequest),
    /// Hill.
    Hill(HillRequest),
    /// Rail fence.
    RailFence(RailFenceRequest),
    /// Vigenère or autokey.
    Vigenere(VigenereRequest),
    /// ADFGVX.
    Adfgvx(AdfgvxRequest),
    /// RSA.
    Rsa(RsaRequest),
    /// Simplified DES.
    Sdes(SdesRequest),
    /// Euler's theorem.
    Euler(PowerRequest),
    /// Extended Euclidean algorithm.
    ExtendedEuclidean(InverseRequest),
    /// Euclidean GCD.
    Gcd(GcdRequest),
    /// Modular exponentiation.
    ModExp(ModExpRequest),
    /// Fermat's little theorem.
    Fermat(PowerRequest),
}

impl CipherRequest {
    /// The kind of this request.
    #[must_use]
    pub const fn kind(&self) -> CipherKind {
        match self {
            Self::KeyedColumnar(_) => CipherKind::KeyedColumnar,
            Self::Monoalphabetic(_) => CipherKind::Monoalphabetic,
            Self::Playfair(_) => CipherKind::Playfair,
            Self::Hill(_) => CipherKind::Hill,
            Self::RailFence(_) => CipherKind::RailFence,
            Self::Vigenere(_) => CipherKind::Vigenere,
            Self::Adfgvx(_) => CipherKind::Adfgvx,
            Self::Rsa(_) => CipherKind::Rsa,
            Self::Sdes(_) => CipherKind::Sdes,
            Self::Euler(_) => CipherKind::Euler,
            Self::ExtendedEuclidean(_) => CipherKind::ExtendedEuclidean,
            Self::Gcd(_) => CipherKind::Gcd,
            Self::ModExp(_) => CipherKind::ModExp,
            Self::Fermat(_) => CipherKind::Fermat,
        }
    }

    /// The service path this request is posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        self.kind().endpoint()
    }

    /// Builds the JSON body, including the discriminator shared endpoints need.
    ///
    /// # Errors
    ///
    /// Returns an error if the fields cannot be serialized.
    pub fn to_payload(&self) -> serde_json::Result<Value> {
        let mut payload = match self {
            Self::KeyedColumnar(req) => serde_json::to_value(req),
            Self::Monoalphabetic(req) => serde_json::to_value(req),
            Self::Playfair(req) => serde_json::to_value(req),
            Self::Hill(req) => serde_json::to_value(req),
            Self::RailFence(req) => serde_json::to_value(req),
            Self::Vigenere(req) => serde_json::to_value(req),
            Self::Adfgvx(req) => serde_json::to_value(req),
            Self::Rsa(req) => serde_json::to_value(req),
            Self::Sdes(req) => serde_json::to_value(req),
            Self::Euler(req) | Self::Fermat(req) => serde_json::to_value(req),
            Self::ExtendedEuclidean(req) => serde_json::to_value(req),
            Self::Gcd(req) => serde_json::to_value(req),
            Self::ModExp(req) => serde_json::to_value(req),
        }?;

        if let (Some((field, tag)), Value::Object(fields)) = (self.kind().wire_tag(), &mut payload)
        {
            fields.insert(field.to_owned(), Value::from(tag));
        }
        Ok(payload)
    }
}
