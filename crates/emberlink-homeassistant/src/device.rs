//! Device and origin blocks of the discovery document
//!
//! A device groups related entities in the hub UI; the origin block names the
//! application announcing them. Both serialize verbatim into the discovery
//! payload.

use serde::Serialize;

/// Device information shared by the entities of one physical device.
///
/// The device `name` also becomes a topic segment (sanitized) when present.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceConfig<'a> {
    /// Identifiers tying entities to the same device registry entry
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub identifiers: &'a [&'a str],
    /// Human-readable device name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    /// Manufacturer or brand name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<&'a str>,
    /// Model identifier or product name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    /// Firmware or software version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<&'a str>,
    /// Hardware version or revision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_version: Option<&'a str>,
    /// Area the device is suggested to belong to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_area: Option<&'a str>,
    /// Identifier of the device routing this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_device: Option<&'a str>,
    /// URL of the device's configuration page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_url: Option<&'a str>,
}

impl<'a> DeviceConfig<'a> {
    /// Create a device with the given registry identifiers.
    pub const fn new(identifiers: &'a [&'a str]) -> Self {
        Self {
            identifiers,
            name: None,
            manufacturer: None,
            model: None,
            sw_version: None,
            hw_version: None,
            suggested_area: None,
            via_device: None,
            configuration_url: None,
        }
    }

    /// Set the device name.
    #[must_use]
    pub const fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the manufacturer.
    #[must_use]
    pub const fn with_manufacturer(mut self, manufacturer: &'a str) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    /// Set the model.
    #[must_use]
    pub const fn with_model(mut self, model: &'a str) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the software version.
    #[must_use]
    pub const fn with_sw_version(mut self, sw_version: &'a str) -> Self {
        self.sw_version = Some(sw_version);
        self
    }

    /// Set the hardware version.
    #[must_use]
    pub const fn with_hw_version(mut self, hw_version: &'a str) -> Self {
        self.hw_version = Some(hw_version);
        self
    }

    /// Set the suggested area.
    #[must_use]
    pub const fn with_suggested_area(mut self, area: &'a str) -> Self {
        self.suggested_area = Some(area);
        self
    }

    /// Set the routing device.
    #[must_use]
    pub const fn with_via_device(mut self, via_device: &'a str) -> Self {
        self.via_device = Some(via_device);
        self
    }

    /// Set the configuration URL.
    #[must_use]
    pub const fn with_configuration_url(mut self, url: &'a str) -> Self {
        self.configuration_url = Some(url);
        self
    }
}

/// The application announcing the discovered entities.
#[derive(Debug, Clone, Serialize)]
pub struct OriginConfig<'a> {
    /// Application name
    pub name: &'a str,
    /// Application version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<&'a str>,
    /// Support URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<&'a str>,
}

impl<'a> OriginConfig<'a> {
    /// Create an origin block with the application name.
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            sw_version: None,
            support_url: None,
        }
    }

    /// Set the application version.
    #[must_use]
    pub const fn with_sw_version(mut self, sw_version: &'a str) -> Self {
        self.sw_version = Some(sw_version);
        self
    }

    /// Set the support URL.
    #[must_use]
    pub const fn with_support_url(mut self, support_url: &'a str) -> Self {
        self.support_url = Some(support_url);
        self
    }
}
