/// Matches `admin.password` in `assets/settings.yaml`.
pub const ADMIN_PASSWORD: &str = "test-password";
pub const BUCKET: &str = "memories";
