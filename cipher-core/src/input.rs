// File:    input.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Raw page input per cipher kind, normalized and validated into service requests.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Raw form input and the per-cipher validation rules.
//!
//! Every field arrives as text, exactly as a user typed it. [`RawInput::validate`]
//! normalizes it for the cipher kind, runs every applicable check and, only if
//! all of them pass, shapes the fields into a [`CipherRequest`].

use serde::Deserialize;

use crate::key_order::normalize_keyword;
use crate::request::{
    AdfgvxRequest, CipherKind, CipherRequest, GcdRequest, HillRequest, InverseRequest,
    KeyedRequest, Message, ModExpRequest, Mode, MonoVariant, MonoalphabeticRequest,
    PlayfairRequest, PowerRequest, RailFenceRequest, RsaRequest, SdesRequest, VigenereRequest,
    VigenereVariant,
};
use crate::validate::{ValidationErrors, Validator};

/// Smallest Hill key matrix order offered.
pub const MIN_HILL_SIZE: usize = 2;
/// Largest Hill key matrix order offered.
pub const MAX_HILL_SIZE: usize = 5;
/// Hill key matrix order shown on first load.
pub const DEFAULT_HILL_SIZE: usize = 3;

const DEFAULT_HILL_MATRIX: [[i64; 3]; 3] = [[6, 24, 1], [13, 16, 10], [20, 17, 15]];

/// The Hill key matrix pre-filled for `size`: the classic 3×3 key for order 3,
/// the identity for the other offered orders. Orders outside 2..=5 get no
/// matrix at all.
#[must_use]
pub fn default_hill_matrix(size: usize) -> Vec<Vec<i64>> {
    if !(MIN_HILL_SIZE..=MAX_HILL_SIZE).contains(&size) {
        return Vec::new();
    }
    if size == DEFAULT_HILL_SIZE {
        return DEFAULT_HILL_MATRIX.iter().map(|row| row.to_vec()).collect();
    }
    (0..size)
        .map(|i| (0..size).map(|j| i64::from(i == j)).collect())
        .collect()
}

fn to_fields<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn text_len(text: &str) -> i64 {
    i64::try_from(text.len()).unwrap_or(i64::MAX)
}

/// Keyed columnar transposition page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct KeyedInput {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Input text.
    pub text: String,
    /// Keyword.
    pub keyword: String,
    /// Column order boxes, usually pre-filled from the keyword.
    pub column_order: Vec<String>,
}

impl KeyedInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let text = normalize_keyword(&self.text);
        let keyword = normalize_keyword(&self.keyword);

        let mut v = Validator::new();
        v.non_empty(&text, "Input text cannot be empty");
        v.non_empty(&keyword, "Keyword cannot be empty");
        v.require(!self.column_order.is_empty(), "Column order not set");
        let column_order = if self.column_order.is_empty() {
            Vec::new()
        } else {
            v.column_order(
                &self.column_order,
                keyword.len(),
                "Column order must have one entry per keyword letter",
                &format!(
                    "Column order must be a permutation of 1 to {}",
                    self.column_order.len()
                ),
            )
        };
        v.finish()?;

        Ok(CipherRequest::KeyedColumnar(KeyedRequest {
            mode: self.mode,
            keyword,
            column_order,
            message: Message::for_mode(self.mode, text),
        }))
    }
}

/// Monoalphabetic substitution page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MonoalphabeticInput {
    /// Substitution family.
    pub variant: MonoVariant,
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Input text, sent as typed.
    pub text: String,
    /// Additive or multiplicative key.
    pub key_k: String,
    /// Affine multiplier.
    pub key_a: String,
    /// Affine shift.
    pub key_b: String,
}

impl MonoalphabeticInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty(&self.text, "Plaintext cannot be empty");
        // Key values such as a non-coprime multiplier are judged by the service.
        let (key_k, key_a, key_b) = match self.variant {
            MonoVariant::Additive | MonoVariant::Multiplicative => {
                (v.int(&self.key_k, "Key k must be an integer"), None, None)
            }
            MonoVariant::Affine => (
                None,
                v.int(&self.key_a, "Key a must be an integer"),
                v.int(&self.key_b, "Key b must be an integer"),
            ),
        };
        v.finish()?;

        Ok(CipherRequest::Monoalphabetic(MonoalphabeticRequest {
            plaintext: self.text.clone(),
            variant: self.variant,
            mode: self.mode,
            key_k,
            key_a,
            key_b,
        }))
    }
}

/// Playfair page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlayfairInput {
    /// Text to encrypt.
    pub plaintext: String,
    /// Square keyword.
    pub keyword: String,
}

impl PlayfairInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let plaintext = normalize_keyword(&self.plaintext);
        let keyword = normalize_keyword(&self.keyword);

        let mut v = Validator::new();
        v.non_empty(&plaintext, "Plaintext cannot be empty");
        v.non_empty(&keyword, "Keyword cannot be empty");
        v.finish()?;

        Ok(CipherRequest::Playfair(PlayfairRequest { plaintext, keyword }))
    }
}

/// Rail fence page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RailFenceInput {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Input text.
    pub text: String,
    /// Number of rails.
    pub rails: String,
}

impl RailFenceInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let text = normalize_keyword(&self.text);

        let mut v = Validator::new();
        v.non_empty(&text, "Input text cannot be empty");
        let rails = v.int(&self.rails, "Number of rails must be an integer");
        if let Some(rails) = rails {
            v.require(rails >= 2, "Number of rails must be at least 2");
            v.require(
                rails <= text_len(&text),
                "Number of rails cannot exceed text length",
            );
        }
        v.finish()?;

        Ok(CipherRequest::RailFence(RailFenceRequest {
            mode: self.mode,
            num_rails: rails.unwrap_or_default(),
            message: Message::for_mode(self.mode, text),
        }))
    }
}

/// Vigenère / autokey page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VigenereInput {
    /// Key schedule.
    pub variant: VigenereVariant,
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Input text.
    pub text: String,
    /// Key.
    pub key: String,
}

impl VigenereInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let text = normalize_keyword(&self.text);
        let key = normalize_keyword(&self.key);

        let mut v = Validator::new();
        v.non_empty(&text, "Input text cannot be empty");
        v.non_empty(&key, "Key cannot be empty");
        v.finish()?;

        Ok(CipherRequest::Vigenere(VigenereRequest {
            mode: self.mode,
            cipher_type: self.variant,
            key,
            message: Message::for_mode(self.mode, text),
        }))
    }
}

/// Hill cipher page.
///
/// A submission that leaves out the matrix gets the default one for its size.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "HillFields")]
pub struct HillInput {
    /// Text to encrypt.
    pub plaintext: String,
    /// Key matrix order.
    pub size: usize,
    /// Key matrix cells, row by row.
    pub matrix: Vec<Vec<String>>,
}

const fn default_hill_size() -> usize {
    DEFAULT_HILL_SIZE
}

#[derive(Deserialize)]
struct HillFields {
    #[serde(default)]
    plaintext: String,
    #[serde(default = "default_hill_size")]
    size: usize,
    #[serde(default)]
    matrix: Option<Vec<Vec<String>>>,
}

impl From<HillFields> for HillInput {
    fn from(fields: HillFields) -> Self {
        let mut input = Self::with_size(fields.size);
        input.plaintext = fields.plaintext;
        if let Some(matrix) = fields.matrix {
            input.matrix = matrix;
        }
        input
    }
}

impl Default for HillInput {
    fn default() -> Self {
        Self::with_size(DEFAULT_HILL_SIZE)
    }
}

impl HillInput {
    /// An empty page whose matrix is pre-filled for `size`. An order outside
    /// 2..=5 gets an empty matrix and is rejected on validation.
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            plaintext: String::new(),
            size,
            matrix: default_hill_matrix(size)
                .iter()
                .map(|row| to_fields(row))
                .collect(),
        }
    }

    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let plaintext = normalize_keyword(&self.plaintext);
        let m = self.size;

        let mut v = Validator::new();
        v.non_empty(&plaintext, "Plaintext cannot be empty");
        v.require(
            (MIN_HILL_SIZE..=MAX_HILL_SIZE).contains(&m),
            "Matrix size must be between 2 and 5",
        );
        let key_matrix = v.square_matrix(
            &self.matrix,
            m,
            0..=25,
            &format!("Key matrix must be {m}×{m}"),
            "Key matrix values must be integers from 0 to 25",
        );
        if m > 0 && plaintext.len() % m != 0 {
            v.require(
                false,
                &format!(
                    "Plaintext length must be a multiple of {m}. Current length: {}",
                    plaintext.len()
                ),
            );
        }
        v.finish()?;

        Ok(CipherRequest::Hill(HillRequest {
            plaintext,
            key_matrix,
            m,
        }))
    }
}

/// ADFGVX page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AdfgvxInput {
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Input text; digits are significant.
    pub text: String,
    /// Polybius square keyword.
    pub poly_key: String,
    /// Transposition keyword.
    pub trans_key: String,
}

impl AdfgvxInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let text = self.text.trim();
        let poly_key = self.poly_key.trim();
        let trans_key = self.trans_key.trim();

        let mut v = Validator::new();
        for field in [text, poly_key, trans_key] {
            v.non_empty(field, "Please fill in all fields");
        }
        v.finish()?;

        Ok(CipherRequest::Adfgvx(AdfgvxRequest {
            mode: self.mode,
            poly_key: poly_key.to_owned(),
            trans_key: trans_key.to_owned(),
            message: Message::for_mode(self.mode, text.to_owned()),
        }))
    }
}

/// RSA page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RsaInput {
    /// First prime.
    pub p: String,
    /// Second prime.
    pub q: String,
    /// Public exponent.
    pub e: String,
    /// Message.
    pub m: String,
}

impl RsaInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let mut v = Validator::new();
        let p = v.int_in_range(&self.p, 2..=i64::MAX, "p must be a prime number ≥ 2");
        let q = v.int_in_range(&self.q, 2..=i64::MAX, "q must be a prime number ≥ 2");
        let e = v.int_in_range(&self.e, 2..=i64::MAX, "e must be ≥ 2");
        let m = v.int_in_range(&self.m, 0..=i64::MAX, "Message m must be ≥ 0");
        v.finish()?;

        Ok(CipherRequest::Rsa(RsaRequest {
            p: p.unwrap_or_default(),
            q: q.unwrap_or_default(),
            e: e.unwrap_or_default(),
            m: m.unwrap_or_default(),
        }))
    }
}

/// Simplified DES page.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SdesInput {
    /// 8-bit block.
    pub plaintext: String,
    /// 10-bit key.
    pub key: String,
    /// P10 table.
    pub p10: Vec<String>,
    /// P8 table.
    pub p8: Vec<String>,
    /// Initial permutation.
    pub ip: Vec<String>,
    /// Expansion permutation.
    pub ep: Vec<String>,
    /// P4 table.
    pub p4: Vec<String>,
    /// First substitution box.
    pub s0: Vec<Vec<String>>,
    /// Second substitution box.
    pub s1: Vec<Vec<String>>,
}

impl Default for SdesInput {
    /// The textbook S-DES parameters.
    fn default() -> Self {
        let sbox = |rows: [[&str; 4]; 4]| -> Vec<Vec<String>> {
            rows.iter().map(|row| to_fields(row)).collect()
        };
        Self {
            plaintext: "10111101".to_owned(),
            key: "1010000010".to_owned(),
            p10: to_fields(&[3, 5, 2, 7, 4, 10, 1, 9, 8, 6]),
            p8: to_fields(&[6, 3, 7, 4, 8, 5, 10, 9]),
            ip: to_fields(&[2, 6, 3, 1, 4, 8, 5, 7]),
            ep: to_fields(&[4, 1, 2, 3, 2, 3, 4, 1]),
            p4: to_fields(&[2, 4, 3, 1]),
            s0: sbox([
                ["01", "00", "11", "10"],
                ["11", "10", "01", "00"],
                ["00", "10", "01", "11"],
                ["11", "01", "11", "10"],
            ]),
            s1: sbox([
                ["00", "01", "10", "11"],
                ["10", "00", "01", "11"],
                ["11", "00", "01", "00"],
                ["10", "01", "00", "11"],
            ]),
        }
    }
}

impl SdesInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        let plaintext = self.plaintext.trim();
        let key = self.key.trim();

        let mut v = Validator::new();
        v.binary(
            plaintext,
            8,
            "Plaintext must be exactly 8 binary digits (0 or 1)",
        );
        v.binary(key, 10, "Key must be exactly 10 binary digits (0 or 1)");
        let p10 = v.table(
            &self.p10,
            10,
            1..=10,
            "P10 must have 10 entries",
            "P10 values must be numbers from 1 to 10",
        );
        let p8 = v.table(
            &self.p8,
            8,
            1..=10,
            "P8 must have 8 entries",
            "P8 values must be numbers from 1 to 10",
        );
        let ip = v.table(
            &self.ip,
            8,
            1..=8,
            "IP must have 8 entries",
            "IP values must be numbers from 1 to 8",
        );
        let ep = v.table(
            &self.ep,
            8,
            1..=4,
            "EP must have 8 entries",
            "EP values must be numbers from 1 to 4",
        );
        let p4 = v.table(
            &self.p4,
            4,
            1..=4,
            "P4 must have 4 entries",
            "P4 values must be numbers from 1 to 4",
        );
        v.sbox(
            &self.s0,
            "S0 box must be 4×4",
            "S0 box values must be 2-bit binary (e.g., 00, 01, 10, 11)",
        );
        v.sbox(
            &self.s1,
            "S1 box must be 4×4",
            "S1 box values must be 2-bit binary (e.g., 00, 01, 10, 11)",
        );
        v.finish()?;

        let trimmed = |sbox: &[Vec<String>]| -> Vec<Vec<String>> {
            sbox.iter()
                .map(|row| row.iter().map(|e| e.trim().to_owned()).collect())
                .collect()
        };
        Ok(CipherRequest::Sdes(SdesRequest {
            plaintext: plaintext.to_owned(),
            key: key.to_owned(),
            p10,
            p8,
            ip,
            ep,
            p4,
            s0: trimmed(&self.s0),
            s1: trimmed(&self.s1),
        }))
    }
}

/// Fields of the Euler and Fermat pages.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PowerInput {
    /// Base.
    pub base: String,
    /// Exponent.
    pub exponent: String,
    /// Modulus, at least 1.
    pub modulus: String,
}

impl PowerInput {
    fn validate(&self) -> Result<PowerRequest, ValidationErrors> {
        const MESSAGE: &str = "Please enter valid values";

        let mut v = Validator::new();
        let base = v.int(&self.base, MESSAGE);
        let exponent = v.int(&self.exponent, MESSAGE);
        let modulus = v.int_in_range(&self.modulus, 1..=i64::MAX, MESSAGE);
        v.finish()?;

        Ok(PowerRequest {
            base: base.unwrap_or_default(),
            exponent: exponent.unwrap_or_default(),
            modulus: modulus.unwrap_or_default(),
        })
    }
}

/// Extended Euclidean page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InverseInput {
    /// Value to invert.
    pub a: String,
    /// Modulus.
    pub m: String,
}

impl InverseInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        const MESSAGE: &str = "Please enter valid positive integers for a and m";

        let mut v = Validator::new();
        let a = v.int_in_range(&self.a, 1..=i64::MAX, MESSAGE);
        let m = v.int_in_range(&self.m, 1..=i64::MAX, MESSAGE);
        v.finish()?;

        Ok(CipherRequest::ExtendedEuclidean(InverseRequest {
            a: a.unwrap_or_default(),
            m: m.unwrap_or_default(),
        }))
    }
}

/// GCD page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GcdInput {
    /// First operand.
    pub a: String,
    /// Second operand.
    pub b: String,
}

impl GcdInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        const MESSAGE: &str = "Please enter valid positive integers for a and b";

        let mut v = Validator::new();
        let a = v.int_in_range(&self.a, 1..=i64::MAX, MESSAGE);
        let b = v.int_in_range(&self.b, 1..=i64::MAX, MESSAGE);
        v.finish()?;

        Ok(CipherRequest::Gcd(GcdRequest {
            a: a.unwrap_or_default(),
            b: b.unwrap_or_default(),
        }))
    }
}

/// Modular exponentiation page.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ModExpInput {
    /// Base.
    pub a: String,
    /// Exponent, at least 0.
    pub n: String,
    /// Modulus, at least 1.
    pub m: String,
}

impl ModExpInput {
    fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        const MESSAGE: &str = "Please enter valid values";

        let mut v = Validator::new();
        let a = v.int(&self.a, MESSAGE);
        let n = v.int_in_range(&self.n, 0..=i64::MAX, MESSAGE);
        let m = v.int_in_range(&self.m, 1..=i64::MAX, MESSAGE);
        v.finish()?;

        Ok(CipherRequest::ModExp(ModExpRequest {
            a: a.unwrap_or_default(),
            n: n.unwrap_or_default(),
            m: m.unwrap_or_default(),
        }))
    }
}

/// Everything a page can submit, tagged by cipher kind.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "cipher", rename_all = "kebab-case")]
pub enum RawInput {
    /// Keyed columnar transposition.
    KeyedColumnar(KeyedInput),
    /// Monoalphabetic substitution.
    Monoalphabetic(MonoalphabeticInput),
    /// Playfair.
    Playfair(PlayfairInput),
    /// Hill.
    Hill(HillInput),
    /// Rail fence.
    RailFence(RailFenceInput),
    /// Vigenère or autokey.
    Vigenere(VigenereInput),
    /// ADFGVX.
    Adfgvx(AdfgvxInput),
    /// RSA.
    Rsa(RsaInput),
    /// Simplified DES.
    Sdes(SdesInput),
    /// Euler's theorem.
    Euler(PowerInput),
    /// Extended Euclidean algorithm.
    ExtendedEuclidean(InverseInput),
    /// Euclidean GCD.
    Gcd(GcdInput),
    /// Modular exponentiation.
    ModExp(ModExpInput),
    /// Fermat's little theorem.
    Fermat(PowerInput),
}

impl RawInput {
    /// The page this input came from.
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

    /// Normalizes and validates the input, then shapes the request.
    ///
    /// # Errors
    ///
    /// Returns every validation failure, in first-seen order and without
    /// duplicates, if any check failed.
    pub fn validate(&self) -> Result<CipherRequest, ValidationErrors> {
        match self {
            Self::KeyedColumnar(input) => input.validate(),
            Self::Monoalphabetic(input) => input.validate(),
            Self::Playfair(input) => input.validate(),
            Self::Hill(input) => input.validate(),
            Self::RailFence(input) => input.validate(),
            Self::Vigenere(input) => input.validate(),
            Self::Adfgvx(input) => input.validate(),
            Self::Rsa(input) => input.validate(),
            Self::Sdes(input) => input.validate(),
            Self::Euler(input) => input.validate().map(CipherRequest::Euler),
            Self::ExtendedEuclidean(input) => input.validate(),
            Self::Gcd(input) => input.validate(),
            Self::ModExp(input) => input.validate(),
            Self::Fermat(input) => input.validate().map(CipherRequest::Fermat),
        }
    }
}
