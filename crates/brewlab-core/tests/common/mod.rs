use brewlab_core::CoffeeLabBuilder;
use tempfile::TempDir;

/// Helper function to create a test lab
pub async fn create_test_lab() -> (TempDir, brewlab_core::CoffeeLab) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let lab = CoffeeLabBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create lab");
    (temp_dir, lab)
}
