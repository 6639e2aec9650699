//! Configuration validation utilities

use crate::schema::Config;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_node(config, &mut report);
        Self::validate_signer(config, &mut report);
        Self::validate_logging(config, &mut report);

        report
    }

    fn validate_node(config: &Config, report: &mut ValidationReport) {
        let node = &config.node;

        if !is_http_url(&node.rpc_url) {
            report.add_error("node.rpc_url", "RPC URL must start with http:// or https://");
        } else if !is_local_url(&node.rpc_url) {
            report.add_warning(
                "node.rpc_url",
                "RPC URL is not local; the simulator impersonates accounts and mines blocks on this node",
            );
        }

        if !is_http_url(&node.platform_url) {
            report.add_error("node.platform_url", "Platform URL must start with http:// or https://");
        }

        if node.platform_url.ends_with('/') {
            report.add_warning("node.platform_url", "Trailing slash will produce a double slash before /v1/reset");
        }

        if node.timeout_seconds == 0 {
            report.add_error("node.timeout_seconds", "Timeout must be greater than 0");
        } else if node.timeout_seconds > 300 {
            report.add_error("node.timeout_seconds", "Timeout too high (max 300s)");
        }

        if !node.sends_json() {
            report.add_warning(
                "node.headers",
                "No JSON content-type header; requests will be form encoded and the dev node may reject them",
            );
        }
    }

    fn validate_signer(config: &Config, report: &mut ValidationReport) {
        match config.signer.private_key.as_deref() {
            None | Some("") => {
                report.add_warning("signer.private_key", "No private key configured; simulation will be unavailable");
            }
            Some(key) => {
                let hex = key.strip_prefix("0x").unwrap_or(key);
                if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    report.add_error("signer.private_key", "Private key must be 32 bytes of hex");
                }
            }
        }
    }

    fn validate_logging(config: &Config, report: &mut ValidationReport) {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            report.add_error(
                "logging.level",
                &format!("Invalid log level: {}. Valid levels: {:?}", config.logging.level, valid_log_levels),
            );
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            report.add_error(
                "logging.format",
                &format!("Invalid log format: {}. Valid formats: {:?}", config.logging.format, valid_log_formats),
            );
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn is_local_url(url: &str) -> bool {
    let host = url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split(['/', ':']).next())
        .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1" | "0.0.0.0" | "[::1]")
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}
