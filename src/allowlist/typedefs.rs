use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        decode_fixed::<20>(hex_str).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        decode_fixed::<32>(hex_str).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Amount in the smallest token unit, kept as a base-10 string of unbounded
/// width. Never goes through a fixed-width integer or a float.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn from_decimal_str(value: &str) -> Option<Self> {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(value.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientRecord {
    pub address: Address,
    pub amount: Amount,
    pub leaf: Hash32,
    pub proof: Vec<Hash32>,
    pub root: Hash32,
    pub reasons: Vec<String>,
}

// Accepts only the `0x`-prefixed form, case-insensitive hex digits.
fn decode_fixed<const N: usize>(hex_str: &str) -> Option<[u8; N]> {
    let digits = hex_str.strip_prefix("0x")?;
    if digits.len() != N * 2 {
        return None;
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).ok()?;
    Some(out)
}
