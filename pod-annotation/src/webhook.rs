//! Names and paths the admission webhooks are registered under.

use constcat::concat;

use super::*;

pub const POD_RESOURCE_SUFFIX: &str = "-v1-pod";

pub const MUTATE_POD_PATH: &str = concat!("/mutate-", POD_RESOURCE_SUFFIX);
pub const VALIDATE_POD_PATH: &str = concat!("/validate-", POD_RESOURCE_SUFFIX);

pub const WEBHOOK_DOMAIN: &str = "pod.hitsumabushi845.github.io";
pub const MUTATING_WEBHOOK_NAME: &str = concat!("mutate.", WEBHOOK_DOMAIN);
pub const VALIDATING_WEBHOOK_NAME: &str = concat!("validate.", WEBHOOK_DOMAIN);
