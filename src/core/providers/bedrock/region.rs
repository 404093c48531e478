//! AWS Region handling for Bedrock
//!
//! Region validation and runtime endpoint construction.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use super::error::BedrockError;

/// Region used when neither the config nor the AWS chain names one
pub const DEFAULT_REGION: &str = "us-west-2";

/// Regions with Bedrock runtime at the time of writing
pub const AWS_REGIONS: &[&str] = &[
    // US regions
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    // EU regions
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    // Asia Pacific regions
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    // Other regions
    "ca-central-1",
    "sa-east-1",
    "us-gov-west-1",
    "us-gov-east-1",
];

static REGION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2}(-gov|-iso[a-z]?)?-[a-z]+-\d{1,2}$").expect("static region pattern")
});

/// Validate the shape of a region name.
///
/// Well-formed regions missing from [`AWS_REGIONS`] are accepted with a
/// warning, since Bedrock launches in new regions regularly.
pub fn validate_region(region: &str) -> Result<(), BedrockError> {
    if !REGION_PATTERN.is_match(region) {
        return Err(BedrockError::configuration(format!(
            "Invalid AWS region: '{}'",
            region
        )));
    }
    if !AWS_REGIONS.contains(&region) {
        warn!(region, "Region is not in the known Bedrock region list");
    }
    Ok(())
}

/// Bedrock runtime endpoint for a region
pub fn runtime_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{}.amazonaws.com", region)
}
