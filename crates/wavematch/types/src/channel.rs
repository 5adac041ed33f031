//! Channel descriptors and resolved channel data

use crate::series::TimeSeries;
use serde::{Deserialize, Serialize};

/// A channel selected for scanning, as sent by the client.
///
/// `path` is a locator understood by the channel store; the HTTP surface
/// passes URLs of the form `/api/channel-data?path=<file>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub channel_name: String,
    pub path: String,
}

impl ChannelDescriptor {
    pub fn new(channel_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            path: path.into(),
        }
    }
}

/// A channel whose backing series has been loaded into memory
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub name: String,
    pub series: TimeSeries,
}

impl ChannelSeries {
    pub fn new(name: impl Into<String>, series: TimeSeries) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}
