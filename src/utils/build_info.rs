/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line description printed by `cashflow_cli version`.
    pub fn describe(&self) -> String {
        format!(
            "cashflow_cli {} ({} {}, built {} for {}, {})",
            self.version, self.git_hash, self.git_status, self.timestamp, self.target, self.rustc
        )
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("CASHFLOW_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("CASHFLOW_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("CASHFLOW_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("CASHFLOW_BUILD_TARGET").unwrap_or("unknown"),
        rustc: option_env!("CASHFLOW_BUILD_RUSTC").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_names_version_and_compiler() {
        let info = current();
        let text = info.describe();
        assert!(text.starts_with(&format!("cashflow_cli {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains(info.target));
        assert!(text.ends_with(&format!(", {})", info.rustc)));
    }
}
