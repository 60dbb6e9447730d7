use serde::Serialize;

/// Input kinds with a fixed Mozambican shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bilhete de Identidade: `##### ##### ###`
    Bi,
    /// Tax number: nine digits and a control letter, `#########X`
    Nuit,
    /// `+258 ## ### ####`
    Phone,
    /// `####`
    PostalCode,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [Self::Bi, Self::Nuit, Self::Phone, Self::PostalCode];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BI" => Some(Self::Bi),
            "NUIT" => Some(Self::Nuit),
            "PHONE" => Some(Self::Phone),
            "POSTAL_CODE" => Some(Self::PostalCode),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bi => "BI",
            Self::Nuit => "NUIT",
            Self::Phone => "PHONE",
            Self::PostalCode => "POSTAL_CODE",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Bi => "##### ##### ###",
            Self::Nuit => "#########X",
            Self::Phone => "+258 ## ### ####",
            Self::PostalCode => "####",
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            Self::Bi => "Formato de BI inválido. Use: ##### ##### ###",
            Self::Nuit => "Formato de NUIT inválido. Use: #########X",
            Self::Phone => "Formato de telefone inválido. Use: +258 ## ### ####",
            Self::PostalCode => "Código postal deve ter 4 dígitos",
        }
    }

    // Shape tokens: '#' ASCII digit, 'A' ASCII uppercase letter, '_' whitespace,
    // anything else must match literally.
    fn shape(self) -> &'static str {
        match self {
            Self::Bi => "#####_#####_###",
            Self::Nuit => "#########A",
            Self::Phone => "+258_##_###_####",
            Self::PostalCode => "####",
        }
    }
}

/// Outcome of a format check. `message` is set only when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: Option<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

pub const BI_DIGITS: usize = 13;
pub const NUIT_DIGITS: usize = 9;
pub const PHONE_COUNTRY_CODE: &str = "258";
pub const PHONE_SUBSCRIBER_DIGITS: usize = 9;
pub const POSTAL_CODE_DIGITS: usize = 4;

pub fn mask(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Bi => mask_bi(raw),
        FieldKind::Nuit => mask_nuit(raw),
        FieldKind::Phone => mask_phone(raw),
        FieldKind::PostalCode => mask_postal_code(raw),
    }
}

pub fn mask_bi(raw: &str) -> String {
    let digits: String = ascii_digits(raw).take(BI_DIGITS).collect();
    group(&digits, &[5, 5, 3], "")
}

pub fn mask_nuit(raw: &str) -> String {
    let mut out = String::with_capacity(NUIT_DIGITS + 1);
    let mut digits = 0usize;
    for c in raw.chars() {
        if digits < NUIT_DIGITS {
            if c.is_ascii_digit() {
                out.push(c);
                digits += 1;
            }
        } else if c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
            break;
        }
    }
    out
}

/// Digits typed after a leading `+` are matched against the country code one
/// at a time; everything else is subscriber number. Without a `+` every digit
/// is subscriber, so `258...` typed bare is not mistaken for the code.
pub fn mask_phone(raw: &str) -> String {
    let digits: String = ascii_digits(raw).collect();
    let code_len = if raw.trim_start().starts_with('+') {
        digits
            .chars()
            .zip(PHONE_COUNTRY_CODE.chars())
            .take_while(|(d, c)| d == c)
            .count()
    } else {
        0
    };
    let mut out = String::from(PHONE_COUNTRY_CODE);
    out.extend(digits[code_len..].chars().take(PHONE_SUBSCRIBER_DIGITS));
    group(&out, &[3, 2, 3, 4], "+")
}

pub fn mask_postal_code(raw: &str) -> String {
    ascii_digits(raw).take(POSTAL_CODE_DIGITS).collect()
}

/// Checks the complete value. An empty string is valid: required-ness is a
/// separate rule owned by the form.
pub fn validate(kind: FieldKind, candidate: &str) -> Verdict {
    if candidate.is_empty() || matches_shape(kind.shape(), candidate) {
        Verdict::pass()
    } else {
        Verdict::fail(kind.invalid_message())
    }
}

/// Thirteen digits once whitespace is removed. Stricter than [`validate`]:
/// the empty string fails.
pub fn bi_digits_valid(bi: &str) -> bool {
    let cleaned: Vec<char> = bi.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.len() == BI_DIGITS && cleaned.iter().all(|c| c.is_ascii_digit())
}

/// Control letter for nine NUIT digits: weighted sum (9..1) mod 23, `A` = 0.
pub fn nuit_control_letter(digits: &str) -> Option<char> {
    let bytes = digits.as_bytes();
    if bytes.len() != NUIT_DIGITS || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sum: u32 = bytes
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * (NUIT_DIGITS - i) as u32)
        .sum();
    char::from_u32(u32::from(b'A') + sum % 23)
}

pub fn nuit_control_valid(nuit: &str) -> bool {
    if !matches_shape(FieldKind::Nuit.shape(), nuit) {
        return false;
    }
    let (digits, letter) = nuit.split_at(NUIT_DIGITS);
    nuit_control_letter(digits).map(String::from).as_deref() == Some(letter)
}

/// Checksum-level check for kinds that have one; `None` for kinds that do not.
pub fn checksum_valid(kind: FieldKind, value: &str) -> Option<bool> {
    match kind {
        FieldKind::Bi => Some(bi_digits_valid(value)),
        FieldKind::Nuit => Some(nuit_control_valid(value)),
        FieldKind::Phone | FieldKind::PostalCode => None,
    }
}

fn ascii_digits(raw: &str) -> impl Iterator<Item = char> + '_ {
    raw.chars().filter(char::is_ascii_digit)
}

// Splits `digits` into the given group sizes joined by single spaces. Groups
// appear only once they have at least one character.
fn group(digits: &str, sizes: &[usize], prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + digits.len() + sizes.len());
    out.push_str(prefix);
    let mut rest = digits;
    for (i, size) in sizes.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        if i > 0 {
            out.push(' ');
        }
        let take = (*size).min(rest.len());
        let (head, tail) = rest.split_at(take);
        out.push_str(head);
        rest = tail;
    }
    out
}

fn matches_shape(shape: &str, candidate: &str) -> bool {
    let mut chars = candidate.chars();
    for token in shape.chars() {
        let Some(c) = chars.next() else {
            return false;
        };
        let ok = match token {
            '#' => c.is_ascii_digit(),
            'A' => c.is_ascii_uppercase(),
            '_' => c.is_whitespace(),
            lit => c == lit,
        };
        if !ok {
            return false;
        }
    }
    chars.next().is_none()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kind() -> impl Strategy<Value = FieldKind> {
        prop_oneof![
            Just(FieldKind::Bi),
            Just(FieldKind::Nuit),
            Just(FieldKind::Phone),
            Just(FieldKind::PostalCode),
        ]
    }

    fn next_valid_char(kind: FieldKind, masked: &str) -> impl Strategy<Value = char> {
        let letter_slot = kind == FieldKind::Nuit && masked.len() == NUIT_DIGITS;
        if letter_slot {
            prop::char::range('A', 'Z').boxed()
        } else {
            prop::char::range('0', '9').boxed()
        }
    }

    proptest! {
        /// Masking an already-masked value changes nothing.
        #[test]
        fn mask_is_idempotent(k in kind(), s in "\\PC{0,40}") {
            let once = mask(k, &s);
            prop_assert_eq!(mask(k, &once), once);
        }

        /// Masking and validating never panic, whatever the input.
        #[test]
        fn mask_and_validate_are_total(k in kind(), s in any::<String>()) {
            let _ = mask(k, &s);
            let _ = validate(k, &s);
            let _ = checksum_valid(k, &s);
        }

        /// A fully masked value passes its own validator.
        #[test]
        fn full_mask_validates(k in kind(), s in "[0-9]{20}[a-z]") {
            let masked = mask(k, &s);
            let complete = match k {
                FieldKind::Bi => masked.len() == 15,
                FieldKind::Nuit => masked.len() == 10,
                FieldKind::Phone => masked.len() == 16,
                FieldKind::PostalCode => masked.len() == 4,
            };
            prop_assert!(complete);
            prop_assert!(validate(k, &masked).valid);
        }

        /// Appending a digit to raw input never shortens the mask.
        #[test]
        fn appending_a_digit_never_shortens_mask(
            k in kind(),
            s in "\\+?[0-9]{0,14}",
            d in prop::char::range('0', '9'),
        ) {
            let before = mask(k, &s);
            let after = mask(k, &format!("{}{}", s, d));
            prop_assert!(after.len() >= before.len(), "{:?} -> {:?}", before, after);
        }

        /// Typing one more accepted character into a masked value either
        /// appends it or appends a separator and it; nothing before moves.
        #[test]
        fn typing_into_masked_value_is_monotonic(
            (k, before, c) in (kind(), "[0-9]{0,14}[A-Z]?").prop_flat_map(|(k, s)| {
                let before = mask(k, &s);
                let c = next_valid_char(k, &before);
                (Just(k), Just(before), c)
            })
        ) {
            let mut typed = before.clone();
            typed.push(c);
            let after = mask(k, &typed);
            prop_assert!(after.starts_with(&before));
            let added = &after[before.len()..];
            let full = match k {
                FieldKind::Bi => before.len() == 15,
                FieldKind::Nuit => before.len() == 10,
                FieldKind::Phone => before.len() == 16,
                FieldKind::PostalCode => before.len() == 4,
            };
            if full {
                prop_assert_eq!(added, "");
            } else {
                let expected_plain = c.to_string();
                let expected_sep = format!(" {}", c);
                prop_assert!(added == expected_plain || added == expected_sep, "added {:?}", added);
            }
        }
    }
}
