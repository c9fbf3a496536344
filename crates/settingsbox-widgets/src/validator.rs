//! Input validators
//!
//! A validator classifies the text of a field as it is typed. Only
//! `Acceptable` text is committed; `Intermediate` text could still become
//! acceptable with more typing; `Invalid` text cannot.

/// Classification of a field's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationState {
    Invalid,
    Intermediate,
    Acceptable,
}

/// Classifies field text
pub trait Validator {
    fn validate(&self, input: &str) -> ValidationState;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationState,
{
    fn validate(&self, input: &str) -> ValidationState {
        self(input)
    }
}

/// Integers within `[bottom, top]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntValidator {
    pub bottom: i64,
    pub top: i64,
}

impl IntValidator {
    pub fn new(bottom: i64, top: i64) -> Self {
        Self { bottom, top }
    }
}

impl Validator for IntValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let text = input.trim();
        if text.is_empty() || text == "-" || text == "+" {
            return ValidationState::Intermediate;
        }
        match text.parse::<i64>() {
            Ok(value) if (self.bottom..=self.top).contains(&value) => ValidationState::Acceptable,
            Ok(value) => {
                // More digits can only move the value away from zero.
                let limit = if value < 0 { self.bottom } else { self.top };
                if value.signum() == limit.signum() && value.unsigned_abs() < limit.unsigned_abs() {
                    ValidationState::Intermediate
                } else {
                    ValidationState::Invalid
                }
            }
            Err(_) => ValidationState::Invalid,
        }
    }
}

/// Floating point numbers within `[bottom, top]` with at most `decimals`
/// digits after the point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleValidator {
    pub bottom: f64,
    pub top: f64,
    pub decimals: usize,
}

impl DoubleValidator {
    pub fn new(bottom: f64, top: f64, decimals: usize) -> Self {
        Self {
            bottom,
            top,
            decimals,
        }
    }
}

impl Validator for DoubleValidator {
    fn validate(&self, input: &str) -> ValidationState {
        let text = input.trim();
        let unsigned = text.trim_start_matches(['-', '+']);
        if unsigned.is_empty() || unsigned == "." {
            return ValidationState::Intermediate;
        }
        let lowered = unsigned.to_ascii_lowercase();
        if lowered.ends_with('e') || lowered.ends_with("e-") || lowered.ends_with("e+") {
            return ValidationState::Intermediate;
        }
        let mantissa = lowered.split('e').next().unwrap_or_default();
        if let Some((_, fraction)) = mantissa.split_once('.') {
            if fraction.len() > self.decimals {
                return ValidationState::Invalid;
            }
        }
        match text.parse::<f64>() {
            Ok(value) if !value.is_finite() => ValidationState::Invalid,
            Ok(value) if value >= self.bottom && value <= self.top => ValidationState::Acceptable,
            Ok(_) => ValidationState::Intermediate,
            Err(_) => ValidationState::Invalid,
        }
    }
}

/// Dotted-quad IPv4 addresses, plus `localhost`
///
/// Empty text is acceptable. Octets may be blank or hold input-mask
/// placeholders (`___`) while typing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ip4Validator;

const LOCALHOST: &str = "localhost";

impl Validator for Ip4Validator {
    fn validate(&self, address: &str) -> ValidationState {
        if address.is_empty() || address == LOCALHOST {
            return ValidationState::Acceptable;
        }
        if LOCALHOST.contains(address) {
            return ValidationState::Intermediate;
        }

        let octets: Vec<&str> = address.split('.').collect();
        if octets.len() > 4 {
            return ValidationState::Invalid;
        }

        let mut empty_octet = false;
        for octet in &octets {
            if octet.is_empty() || *octet == "___" || *octet == "   " {
                empty_octet = true;
                continue;
            }
            match octet.trim_matches([' ', '_']).parse::<i64>() {
                Ok(value) if !(0..=255).contains(&value) => return ValidationState::Invalid,
                Ok(_) => {}
                Err(e)
                    if matches!(
                        e.kind(),
                        std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow
                    ) =>
                {
                    return ValidationState::Invalid
                }
                Err(_) => return ValidationState::Intermediate,
            }
        }

        if octets.len() < 4 || empty_octet {
            ValidationState::Intermediate
        } else {
            ValidationState::Acceptable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValidationState::*;

    #[test]
    fn test_ip4_table() {
        let v = Ip4Validator;
        let cases = [
            ("", Acceptable),
            ("localhost", Acceptable),
            ("local", Intermediate),
            ("host", Intermediate),
            ("192.168.0.1", Acceptable),
            ("0.0.0.0", Acceptable),
            ("255.255.255.255", Acceptable),
            ("192.168.0", Intermediate),
            ("192.168..1", Intermediate),
            ("192.168.___.1", Intermediate),
            ("192.168.   .1", Intermediate),
            ("192.168._1_.1", Acceptable),
            ("1.2.3.4.5", Invalid),
            ("256.1.1.1", Invalid),
            ("1.-1.1.1", Invalid),
            ("1.99999999999999999999.1.1", Invalid),
            ("1.x.1.1", Intermediate),
            ("localhostx", Intermediate),
        ];
        for (input, expected) in cases {
            assert_eq!(v.validate(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_int_validator() {
        let v = IntValidator::new(0, 100);
        assert_eq!(v.validate(""), Intermediate);
        assert_eq!(v.validate("42"), Acceptable);
        assert_eq!(v.validate("100"), Acceptable);
        assert_eq!(v.validate("101"), Invalid);
        assert_eq!(v.validate("-1"), Invalid);
        assert_eq!(v.validate("4x"), Invalid);

        let v = IntValidator::new(10, 500);
        assert_eq!(v.validate("5"), Intermediate);
        assert_eq!(v.validate("50"), Acceptable);
    }

    #[test]
    fn test_double_validator() {
        let v = DoubleValidator::new(-1e6, 1e6, 7);
        assert_eq!(v.validate("1.5"), Acceptable);
        assert_eq!(v.validate("-"), Intermediate);
        assert_eq!(v.validate("."), Intermediate);
        assert_eq!(v.validate("1e"), Intermediate);
        assert_eq!(v.validate("1e3"), Acceptable);
        assert_eq!(v.validate("0.12345678"), Invalid);
        assert_eq!(v.validate("2e6"), Intermediate);
        assert_eq!(v.validate("abc"), Invalid);
        assert_eq!(v.validate("inf"), Invalid);
    }

    #[test]
    fn test_closure_validator() {
        let even = |s: &str| match s.parse::<i64>() {
            Ok(n) if n % 2 == 0 => Acceptable,
            _ => Invalid,
        };
        assert_eq!(even.validate("4"), Acceptable);
        assert_eq!(even.validate("3"), Invalid);
    }
}
