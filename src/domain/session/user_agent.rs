// src/domain/session/user_agent.rs
use crate::domain::session::entity::DeviceType;

/// Classification derived from a raw user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDevice {
    pub device_type: DeviceType,
    pub browser: String,
    pub platform: String,
}

impl ClientDevice {
    pub fn unknown() -> Self {
        Self {
            device_type: DeviceType::Unknown,
            browser: "Unknown".into(),
            platform: "Unknown".into(),
        }
    }
}

const BOT_MARKERS: &[&str] = &[
    "bot", "crawler", "spider", "slurp", "curl/", "wget/", "python-requests", "httpclient",
];

/// Derive device type, browser and platform from a user-agent string.
///
/// Matching is plain substring inspection over the lowercased input, so the
/// same input always yields the same classification. Anything unrecognized
/// degrades to `Unknown`; this function cannot fail.
pub fn classify(user_agent: Option<&str>) -> ClientDevice {
    let Some(raw) = user_agent else {
        return ClientDevice::unknown();
    };
    let ua = raw.trim().to_lowercase();
    if ua.is_empty() {
        return ClientDevice::unknown();
    }

    let device_type = classify_device(&ua);
    ClientDevice {
        device_type,
        browser: classify_browser(&ua).into(),
        platform: classify_platform(&ua).into(),
    }
}

fn classify_device(ua: &str) -> DeviceType {
    if BOT_MARKERS.iter().any(|m| ua.contains(m)) {
        return DeviceType::Bot;
    }
    // Android tablets do not advertise "mobile"; iPads never do.
    if ua.contains("ipad") || ua.contains("tablet") {
        return DeviceType::Tablet;
    }
    if ua.contains("android") && !ua.contains("mobile") {
        return DeviceType::Tablet;
    }
    if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        return DeviceType::Mobile;
    }
    if ua.contains("windows")
        || ua.contains("macintosh")
        || ua.contains("x11")
        || ua.contains("linux")
        || ua.contains("cros")
    {
        return DeviceType::Desktop;
    }
    DeviceType::Unknown
}

fn classify_browser(ua: &str) -> &'static str {
    // Order matters: Edge and Opera embed "chrome", Chrome embeds "safari".
    if ua.contains("edg/") || ua.contains("edge/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("firefox/") {
        "Firefox"
    } else if ua.contains("chrome/") || ua.contains("crios/") {
        "Chrome"
    } else if ua.contains("safari/") {
        "Safari"
    } else if ua.contains("msie") || ua.contains("trident/") {
        "Internet Explorer"
    } else {
        "Unknown"
    }
}

fn classify_platform(ua: &str) -> &'static str {
    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "iOS"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("windows") {
        "Windows"
    } else if ua.contains("mac os x") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("cros") {
        "ChromeOS"
    } else if ua.contains("linux") || ua.contains("x11") {
        "Linux"
    } else {
        "Unknown"
    }
}
