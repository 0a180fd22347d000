//! Horizon grouping configuration.

use cro_core::enums::HorizonPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HorizonConfig {
    /// `assigned` uses the horizon stored at intake; `scheduled` derives it
    /// from the scheduled date and today's date.
    #[serde(default)]
    pub policy: HorizonPolicy,
}
