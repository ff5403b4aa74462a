//! # CLI Interface
//!
//! `vecsign-keycheck <SIGNING_KEY> <VERIFYING_KEY>`: both keys in their
//! URL-safe base64 text form. Either may begin with `-`; the positionals
//! accept that without a `--` separator.

use clap::Parser;

use crate::logging::LogFormat;

/// Check that a signing key and a verifying key form an Ed25519 pair.
///
/// Signs a fixed plaintext with the signing key and verifies it with the
/// verifying key.
#[derive(Parser, Debug)]
#[command(name = "vecsign-keycheck", version, about)]
pub struct KeycheckCli {
    /// Signing key, URL-safe base64 (44 characters).
    #[arg(allow_hyphen_values = true)]
    pub signing_key: String,

    /// Verifying key, URL-safe base64 (44 characters).
    #[arg(allow_hyphen_values = true)]
    pub verifying_key: String,

    /// Log output format.
    #[arg(long, value_enum, env = "VECSIGN_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        KeycheckCli::command().debug_assert();
    }

    #[test]
    fn takes_two_positionals() {
        let cli = KeycheckCli::try_parse_from(["vecsign-keycheck", "sk", "vk"]).unwrap();
        assert_eq!(cli.signing_key, "sk");
        assert_eq!(cli.verifying_key, "vk");
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(KeycheckCli::try_parse_from(["vecsign-keycheck", "sk"]).is_err());
        assert!(KeycheckCli::try_parse_from(["vecsign-keycheck", "a", "b", "c"]).is_err());
    }

    #[test]
    fn dash_prefixed_key_after_separator() {
        let cli = KeycheckCli::try_parse_from(["vecsign-keycheck", "--", "-abc", "def"]).unwrap();
        assert_eq!(cli.signing_key, "-abc");
    }

    #[test]
    fn dash_prefixed_keys_without_separator() {
        // A 0xF8 first byte encodes to a leading '-'.
        let sk = vecsign::codec::fmt_key(&[0xF8; 32]);
        let vk = vecsign::codec::fmt_key(&[0xF9; 32]);
        assert!(sk.starts_with('-') && vk.starts_with('-'));

        let cli = KeycheckCli::try_parse_from(["vecsign-keycheck", &sk, &vk]).unwrap();
        assert_eq!(cli.signing_key, sk);
        assert_eq!(cli.verifying_key, vk);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn dash_prefixed_keys_after_log_format() {
        let sk = vecsign::codec::fmt_key(&[0xFB; 32]);
        let cli = KeycheckCli::try_parse_from([
            "vecsign-keycheck",
            "--log-format",
            "json",
            &sk,
            "vk",
        ])
        .unwrap();
        assert_eq!(cli.signing_key, sk);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn json_log_format() {
        let cli =
            KeycheckCli::try_parse_from(["vecsign-keycheck", "--log-format", "json", "a", "b"])
                .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
