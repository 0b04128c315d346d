use viz_core::{VisualizerConfig, VisualizerProps};

/// Raw attribute values read from the visualizer container.
#[derive(Clone, Debug, Default)]
pub struct ContainerAttrs {
    pub effect: Option<String>,
    pub playing: Option<String>,
    pub seed: Option<String>,
    pub track: Option<String>,
}

impl ContainerAttrs {
    pub fn props(&self) -> VisualizerProps {
        // an empty attribute counts as unset
        let effect = self.effect.as_deref().filter(|t| !t.trim().is_empty());
        let mut props = VisualizerProps::new(parse_flag(self.playing.as_deref()), effect);
        props.current_track = self.track.clone().filter(|t| !t.trim().is_empty());
        props
    }

    pub fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            seed: parse_seed(self.seed.as_deref()),
            ..VisualizerConfig::default()
        }
    }
}

/// Boolean attribute: present-and-empty, "true", "1", "yes" and "on" are true.
#[inline]
pub fn parse_flag(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) => matches!(v.as_str(), "" | "true" | "1" | "yes" | "on"),
        None => false,
    }
}

#[inline]
pub fn parse_seed(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}
