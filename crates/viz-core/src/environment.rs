//! Decide whether we run in a plain browser tab or embedded as a Farcaster
//! mini-app. The probe is collected by the front-end; the rules live here.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    Browser,
    FarcasterWeb,
    FarcasterMobile,
}

impl AppEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            AppEnvironment::Browser => "browser",
            AppEnvironment::FarcasterWeb => "farcaster-web",
            AppEnvironment::FarcasterMobile => "farcaster-mobile",
        }
    }

    pub fn is_embedded(self) -> bool {
        !matches!(self, AppEnvironment::Browser)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MOBILE_UA_MARKERS: [&str; 7] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];
const MOBILE_MAX_WIDTH: f64 = 768.0;
const FRAME_MAX_WIDTH: f64 = 450.0;
const PREVIEW_HOSTS: [&str; 2] = ["ngrok.io", "vercel.app"];

/// Facts read from the page at startup.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentProbe {
    /// Any of `window.farcaster`, `window.sdk`, `window.minikit`.
    pub has_sdk_global: bool,
    pub has_ready_fn: bool,
    pub user_agent: String,
    /// CSS width of the window; 0 when it could not be read, which counts
    /// as neither narrow nor frame-sized.
    pub inner_width: f64,
    pub hostname: String,
    /// Running inside another window (iframe).
    pub in_frame: bool,
    pub referrer: String,
}

impl EnvironmentProbe {
    fn ua_is_mobile(&self) -> bool {
        let ua = self.user_agent.to_ascii_lowercase();
        MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m))
    }

    fn narrow(&self) -> bool {
        self.inner_width > 0.0 && self.inner_width < MOBILE_MAX_WIDTH
    }
}

pub fn detect(probe: &EnvironmentProbe) -> AppEnvironment {
    let farcaster = |mobile: bool| {
        if mobile {
            AppEnvironment::FarcasterMobile
        } else {
            AppEnvironment::FarcasterWeb
        }
    };

    if probe.has_sdk_global || probe.has_ready_fn {
        return farcaster(probe.ua_is_mobile() || probe.narrow());
    }

    let ua = probe.user_agent.to_ascii_lowercase();
    if ua.contains("farcaster") || ua.contains("miniapp") {
        return farcaster(probe.ua_is_mobile());
    }

    if PREVIEW_HOSTS.iter().any(|h| probe.hostname.contains(h)) {
        let small = probe.inner_width > 0.0 && probe.inner_width <= FRAME_MAX_WIDTH;
        let referrer = probe.referrer.contains("farcaster") || probe.referrer.contains("warpcast");
        if probe.in_frame || small || referrer {
            return farcaster(probe.narrow());
        }
    }

    AppEnvironment::Browser
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub environment: AppEnvironment,
    pub wallet_support: &'static str,
    pub features: &'static [&'static str],
}

impl EnvironmentConfig {
    pub fn for_environment(environment: AppEnvironment) -> Self {
        let (wallet_support, features): (&str, &[&str]) = match environment {
            AppEnvironment::Browser => (
                "full",
                &["wallet-connect", "manual-network-switch", "full-ui"],
            ),
            AppEnvironment::FarcasterWeb => (
                "farcaster-native",
                &["farcaster-auth", "embedded-wallet", "frame-integration"],
            ),
            AppEnvironment::FarcasterMobile => (
                "farcaster-native",
                &["mobile-optimized", "farcaster-auth", "native-ui"],
            ),
        };
        Self {
            environment,
            wallet_support,
            features,
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(&feature)
    }
}
