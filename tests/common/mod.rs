#![allow(dead_code)]

use std::{fs, path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Keeps temporary directories alive for the whole test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const WALLET_ID: &str = "9b2f6c1e-3d4a-4f5b-8c6d-7e8f9a0b1c2d";
pub const EVERYDAY_ID: &str = "6f1c2d4e-8a41-4c57-9d1e-2b7f0c3a9e10";

/// A cash account holding 500 and a bank account holding 1500 with a
/// monthly -50 movement anchored on 2024-01-15.
pub const SNAPSHOT: &str = r#"[
    {
        "id": "9b2f6c1e-3d4a-4f5b-8c6d-7e8f9a0b1c2d",
        "name": "Wallet",
        "type": "cash",
        "starting_balance": "500",
        "created_at": "2024-01-01T08:00:00Z",
        "movements": [
            {
                "id": "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
                "amount": 500,
                "repeats_every": "none",
                "created_at": "2024-01-01T08:00:00Z"
            }
        ]
    },
    {
        "id": "6f1c2d4e-8a41-4c57-9d1e-2b7f0c3a9e10",
        "name": "Everyday",
        "type": "bank",
        "starting_balance": 1550,
        "created_at": "2024-01-01T09:00:00Z",
        "movements": [
            {
                "id": "2b3c4d5e-6f7a-4b8c-9d0e-1f2a3b4c5d6e",
                "amount": "1550.00",
                "repeats_every": "none",
                "created_at": "2024-01-01T09:00:00Z"
            },
            {
                "id": "3c4d5e6f-7a8b-4c9d-8e1f-2a3b4c5d6e7f",
                "amount": -50,
                "repeats_every": "monthly",
                "created_at": "2024-01-15T00:00:00Z"
            }
        ]
    }
]"#;

fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Writes `contents` to a fresh snapshot file.
pub fn write_snapshot(contents: &str) -> PathBuf {
    let path = temp_dir().join("snapshot.json");
    fs::write(&path, contents).expect("write snapshot");
    path
}

/// An empty directory for `CASHFLOW_HOME`.
pub fn cashflow_home() -> PathBuf {
    temp_dir()
}
