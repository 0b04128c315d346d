use viz_core::environment::{detect, AppEnvironment, EnvironmentConfig, EnvironmentProbe};

const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0";
const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

fn desktop() -> EnvironmentProbe {
    EnvironmentProbe {
        user_agent: DESKTOP_UA.into(),
        inner_width: 1440.0,
        hostname: "partiture.app".into(),
        ..Default::default()
    }
}

#[test]
fn plain_browser_by_default() {
    assert_eq!(detect(&desktop()), AppEnvironment::Browser);
    assert_eq!(detect(&EnvironmentProbe::default()), AppEnvironment::Browser);
}

#[test]
fn sdk_global_means_farcaster() {
    let mut p = desktop();
    p.has_sdk_global = true;
    assert_eq!(detect(&p), AppEnvironment::FarcasterWeb);
    p.inner_width = 390.0;
    assert_eq!(detect(&p), AppEnvironment::FarcasterMobile);

    let mut q = desktop();
    q.has_ready_fn = true;
    q.user_agent = IPHONE_UA.into();
    assert_eq!(detect(&q), AppEnvironment::FarcasterMobile);
}

#[test]
fn unreadable_width_is_not_mobile() {
    let mut p = desktop();
    p.has_sdk_global = true;
    p.inner_width = 0.0;
    assert_eq!(detect(&p), AppEnvironment::FarcasterWeb);

    let mut q = desktop();
    q.hostname = "preview.vercel.app".into();
    q.inner_width = 0.0;
    assert_eq!(detect(&q), AppEnvironment::Browser);
}

#[test]
fn user_agent_marker() {
    let mut p = desktop();
    p.user_agent = format!("{DESKTOP_UA} Farcaster/1.2");
    assert_eq!(detect(&p), AppEnvironment::FarcasterWeb);
    p.user_agent = format!("{IPHONE_UA} MiniApp");
    assert_eq!(detect(&p), AppEnvironment::FarcasterMobile);
}

#[test]
fn preview_host_needs_extra_indicator() {
    let mut p = desktop();
    p.hostname = "partiture-git-main.vercel.app".into();
    assert_eq!(detect(&p), AppEnvironment::Browser);
    p.in_frame = true;
    assert_eq!(detect(&p), AppEnvironment::FarcasterWeb);

    let mut r = desktop();
    r.hostname = "abc.ngrok.io".into();
    r.referrer = "https://warpcast.com/~/developers".into();
    assert_eq!(detect(&r), AppEnvironment::FarcasterWeb);
}

#[test]
fn config_features() {
    let cfg = EnvironmentConfig::for_environment(AppEnvironment::FarcasterMobile);
    assert!(cfg.has_feature("mobile-optimized"));
    assert_eq!(cfg.wallet_support, "farcaster-native");
    assert!(EnvironmentConfig::for_environment(AppEnvironment::Browser).has_feature("full-ui"));
    assert!(AppEnvironment::FarcasterWeb.is_embedded());
    assert_eq!(AppEnvironment::FarcasterMobile.to_string(), "farcaster-mobile");
}
