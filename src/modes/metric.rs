//! Graphite-style metric line: `<scheme>\t<count>\t<epoch>`.

/// Metric path for a process count.
///
/// An empty `scheme_override` falls back to the host name.
pub fn scheme_path(scheme_override: &str, hostname: &str, process: &str) -> String {
    let prefix = if scheme_override.is_empty() {
        hostname
    } else {
        scheme_override
    };
    format!("{}.processcount.{}", prefix, process)
}

pub fn format_line(scheme: &str, count: usize, epoch_seconds: i64) -> String {
    format!("{}\t{}\t{}", scheme, count, epoch_seconds)
}

/// Host name of the machine, `localhost` if it cannot be determined.
pub fn hostname() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!("Cannot determine host name, using 'localhost': {}", e);
            "localhost".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_override_wins() {
        assert_eq!(
            scheme_path("myhost", "web01", "sshd"),
            "myhost.processcount.sshd"
        );
    }

    #[test]
    fn test_scheme_falls_back_to_hostname() {
        assert_eq!(scheme_path("", "web01", "sshd"), "web01.processcount.sshd");
    }

    #[test]
    fn test_format_line() {
        let scheme = scheme_path("myhost", "ignored", "sshd");
        assert_eq!(
            format_line(&scheme, 3, 1_700_000_000),
            "myhost.processcount.sshd\t3\t1700000000"
        );
    }
}
