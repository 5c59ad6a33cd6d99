use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    /// 覆寫既有檔案，必要時建立上層目錄
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directories_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").display().to_string();
        let storage = LocalStorage::new(base);

        storage.write_file("out.csv", b"first").await.unwrap();
        storage.write_file("out.csv", b"second").await.unwrap();

        let data = storage.read_file("out.csv").await.unwrap();
        assert_eq!(data, b"second");

        let reported = storage.location("out.csv");
        assert_eq!(std::fs::read(&reported).unwrap(), b"second");
    }
}
