#[cfg(test)]
pub mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::SystemTime;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Create an empty folder, unique to the caller, within the system's temp folder.
    pub fn temp_dir() -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_micros();
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        let buf = std::env::temp_dir().join(format!(
            "npv-membership-{}-{timestamp}-{counter}",
            std::process::id()
        ));
        fs::create_dir_all(&buf).unwrap();

        buf
    }
}
