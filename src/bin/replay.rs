//! Scenario replay tool for the panels engine
//!
//! Feeds a recorded pointer/command script through a fresh
//! `PanelsController` and prints every claim decision and panel state
//! transition. Useful for reproducing gesture bugs from the field without
//! a device: dump the event stream to YAML or JSON and replay it here with
//! `RUST_LOG=gesture=trace,panels=debug`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

use overpanels::{
    LayoutDirection, LockState, Panel, PanelsConfig, PanelsController, PointerEvent, Rect, Side,
    Viewport,
};

/// Replay a recorded panels gesture scenario
#[derive(Parser, Debug)]
#[command(name = "replay", version, about = "Replay a panels gesture scenario")]
struct CliArgs {
    /// Scenario file (.yaml or .json)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Simulated frame rate used to drain animations
    #[arg(long, value_name = "HZ", default_value_t = 60)]
    fps: u32,

    /// Print the final controller summary as JSON
    #[arg(long)]
    json: bool,
}

/// One declared child panel slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PanelSlot {
    slot: Panel,
}

/// One scripted step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
enum Step {
    /// Feed a pointer event
    Pointer { event: PointerEvent },
    /// Programmatic open/close entry points
    OpenStart,
    OpenEnd,
    Close,
    /// Change a side's lock state
    Lock { side: Side, state: LockState },
    /// Toggle the full-width start panel override
    FullWidthStart { enabled: bool },
    /// Report a new viewport size
    Resize { width: f32, height: f32 },
    /// Replace the exclusion regions
    ExclusionRegions { regions: Vec<Rect> },
    /// Run frame ticks until the animation settles
    Settle,
}

/// A recorded scenario: initial layout plus a step script
#[derive(Debug, Serialize, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: PanelsConfig,
    #[serde(default)]
    direction: LayoutDirection,
    viewport: Viewport,
    panels: Vec<PanelSlot>,
    #[serde(default)]
    steps: Vec<Step>,
}

impl Scenario {
    fn load(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        let scenario: Scenario = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).context("failed to parse scenario")?,
            _ => serde_yaml::from_str(&content).context("failed to parse scenario")?,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// The layout manages exactly three panels: start, center, end, in
    /// that order. Anything else is a fatal configuration error.
    fn validate(&self) -> anyhow::Result<()> {
        let slots: Vec<Panel> = self.panels.iter().map(|p| p.slot).collect();
        if slots != [Panel::Start, Panel::Center, Panel::End] {
            bail!(
                "scenario must declare exactly three panels (start, center, end), got {:?}",
                slots
            );
        }
        Ok(())
    }
}

/// Final state printed after the replay
#[derive(Debug, Serialize)]
struct Summary {
    offset: f32,
    selected_panel: Panel,
    start_state: overpanels::PanelState,
    end_state: overpanels::PanelState,
}

fn main() -> anyhow::Result<()> {
    overpanels::tracing::init();
    let args = CliArgs::parse();
    let scenario = Scenario::load(&args.scenario)?;
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let mut controller = PanelsController::new(scenario.config.clone(), scenario.direction);
    controller.register_state_listener(Side::Start, |state| {
        println!("start panel -> {state:?}");
    });
    controller.register_state_listener(Side::End, |state| {
        println!("end panel -> {state:?}");
    });
    controller.set_viewport(scenario.viewport);

    let frame = Duration::from_millis((1000 / args.fps).max(1) as u64);
    let mut clock = Duration::ZERO;

    for (index, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::Pointer { event } => {
                clock = clock.max(event.time);
                let claim = controller.handle_pointer_event(event);
                println!("[{index}] pointer {:?} at x={} -> {claim:?}", event.kind, event.x);
            }
            Step::OpenStart => {
                println!("[{index}] open_start");
                controller.open_start();
            }
            Step::OpenEnd => {
                println!("[{index}] open_end");
                controller.open_end();
            }
            Step::Close => {
                println!("[{index}] close");
                controller.close();
            }
            Step::Lock { side, state } => {
                println!("[{index}] lock {side:?} = {state:?}");
                controller.set_lock_state(*side, *state);
            }
            Step::FullWidthStart { enabled } => {
                println!("[{index}] full_width_start = {enabled}");
                controller.set_full_width_start(*enabled);
            }
            Step::Resize { width, height } => {
                println!("[{index}] resize {width}x{height}");
                controller.set_viewport(Viewport {
                    width: *width,
                    height: *height,
                });
            }
            Step::ExclusionRegions { regions } => {
                println!("[{index}] exclusion regions: {}", regions.len());
                controller.set_exclusion_regions(regions.clone());
            }
            Step::Settle => {
                let mut frames = 0u32;
                while controller.tick(clock) {
                    clock += frame;
                    frames += 1;
                }
                println!("[{index}] settled after {frames} frames at offset {}", controller.offset());
            }
        }
    }

    let summary = Summary {
        offset: controller.offset(),
        selected_panel: controller.selected_panel(),
        start_state: controller.panel_state(Side::Start),
        end_state: controller.panel_state(Side::End),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "final: offset={} selected={:?} start={:?} end={:?}",
            summary.offset, summary.selected_panel, summary.start_state, summary.end_state
        );
    }
    Ok(())
}
