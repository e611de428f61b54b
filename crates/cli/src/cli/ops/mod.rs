pub mod decrypt;
pub mod encrypt;
pub mod init;
pub mod keys;
pub mod version;

pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use init::Init;
pub use keys::Keys;
pub use version::Version;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Read all of `reader` as UTF-8 text, e.g. a message or envelope piped to stdin
pub async fn read_input<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::op::{Op, OpContext};
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> OpContext {
        OpContext::new(Some(temp.path().join("state")))
    }

    async fn init(ctx: &OpContext) {
        Init {
            default_log_level: "warn".to_string(),
            keys_dir: None,
        }
        .execute(ctx)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_read_input() {
        let text = read_input("piped\nmessage".as_bytes()).await.unwrap();
        assert_eq!(text, "piped\nmessage");

        assert_eq!(read_input(&b""[..]).await.unwrap(), "");

        let err = read_input(&[0xffu8, 0xfe][..]).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_commands_require_init() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let err = keys::status::Status.execute(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("sealpost init"));
    }

    #[tokio::test]
    async fn test_init_rejects_bad_log_level() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let result = Init {
            default_log_level: "loud".to_string(),
            keys_dir: None,
        }
        .execute(&ctx)
        .await;
        assert!(matches!(result, Err(init::InitError::InvalidLogLevel(_))));
    }

    #[tokio::test]
    async fn test_key_lifecycle() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        init(&ctx).await;

        let status = keys::status::Status.execute(&ctx).await.unwrap();
        assert!(status.starts_with("Messaging keys: not set up"));
        assert!(matches!(
            keys::show::Show.execute(&ctx).await,
            Err(keys::show::ShowError::NoPublicKey)
        ));

        keys::generate::Generate { force: false }
            .execute(&ctx)
            .await
            .unwrap();
        let public = keys::show::Show.execute(&ctx).await.unwrap();
        assert!(public.contains("\"RSA-OAEP-256\""));
        assert!(!public.contains("\"d\""));

        // A second generate must not silently replace the identity
        assert!(matches!(
            keys::generate::Generate { force: false }.execute(&ctx).await,
            Err(keys::generate::GenerateError::AlreadyExists)
        ));

        keys::clear::Clear.execute(&ctx).await.unwrap();
        let status = keys::status::Status.execute(&ctx).await.unwrap();
        assert!(status.starts_with("Messaging keys: not set up"));
    }

    #[tokio::test]
    async fn test_encrypt_then_decrypt_to_self() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        init(&ctx).await;

        keys::generate::Generate { force: false }
            .execute(&ctx)
            .await
            .unwrap();
        let public = keys::show::Show.execute(&ctx).await.unwrap();
        let recipient = temp.path().join("recipient.jwk");
        std::fs::write(&recipient, public).unwrap();

        let envelope = Encrypt {
            recipient,
            message: Some("hello".to_string()),
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert!(envelope.contains("\"encryptedKeyPackage\""));

        let envelope_path = temp.path().join("envelope.json");
        std::fs::write(&envelope_path, envelope).unwrap();

        let decrypt = Decrypt {
            envelope: Some(envelope_path),
        };
        assert_eq!(decrypt.execute(&ctx).await.unwrap(), "hello");

        // Without a stored key the error points at key setup
        keys::clear::Clear.execute(&ctx).await.unwrap();
        assert!(matches!(
            decrypt.execute(&ctx).await,
            Err(decrypt::DecryptError::SetupRequired(_))
        ));
    }
}
