use auxinput::backend::GilrsDriver;
use auxinput::clock::FrameClock;
use auxinput::config::{self, AppConfig};
use auxinput::input::{
    AxisAction, DeviceIndex, GamepadAxis, GamepadButton, GamepadId, InputAction, InputSubsystem,
    Key, MouseButton, Running, Uninitialized, WindowSurface,
};
use chrono::Local;
use color_eyre::{eyre::eyre, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Stand-in for the platform window. Stays open until the engine closes it.
struct HeadlessWindow {
    open: bool,
}

impl WindowSurface for HeadlessWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn process_events(&mut self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = config::default_config_path();
    let config = config::ensure_default(&config_path)
        .await
        .map_err(|e| eyre!("Failed to load config: {}", e))?;
    setup_logging_env(config.tracing_level());
    info!("Waking up {} with config {}", config.engine_name, config_path.display());

    let mut window = HeadlessWindow { open: true };
    let (driver, _feed) = GilrsDriver::new(config.gamepads_enabled);

    let mut subsystem = InputSubsystem::create(Some(config.input.clone()), Box::new(driver));
    register_demo_bindings(&mut subsystem);

    let mut subsystem = subsystem
        .initialize(&window)
        .map_err(|e| eyre!("Failed to initialize input: {}", e))?;
    info!("Wake up protocol complete!");

    run_frame_loop(&config, &mut window, &mut subsystem).await;

    window.open = false;
    info!("Shutting down after {} ticks", subsystem.tick_count());
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging_env(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn register_demo_bindings(subsystem: &mut InputSubsystem<Uninitialized>) {
    let router = subsystem.router_mut();

    router.bind_key(Key::Space, InputAction::Clicked, |control, action| {
        info!("Key {} {:?}", control, action);
    });
    router.bind_mouse_button(MouseButton::LEFT, InputAction::Pressed, |control, action| {
        info!("Mouse button {} {:?}", control, action);
    });

    for pad in GamepadId::all().take(4) {
        router.bind_gamepad_button(
            pad,
            GamepadButton::CROSS,
            InputAction::Clicked,
            move |control, action| info!("Gamepad {} button {} {:?}", pad.slot(), control, action),
        );
        router.bind_gamepad_axis(
            pad,
            GamepadAxis::LeftX,
            AxisAction::Tilted,
            move |control, action, value| {
                debug!(
                    "Gamepad {} axis {} {:?} {:.3}",
                    pad.slot(),
                    control,
                    action,
                    value
                )
            },
        );
        router.bind_gamepad_axis(
            pad,
            GamepadAxis::RightTrigger,
            AxisAction::Tilted,
            move |control, action, value| {
                debug!(
                    "Gamepad {} trigger {} {:?} {:.3}",
                    pad.slot(),
                    control,
                    action,
                    value
                )
            },
        );
    }
}

async fn run_frame_loop(
    config: &AppConfig,
    window: &mut HeadlessWindow,
    subsystem: &mut InputSubsystem<Running>,
) {
    let mut clock = FrameClock::new(config.max_fps);
    clock.reset();

    let period = clock
        .frame_period()
        .unwrap_or(tokio::time::Duration::from_millis(1));
    info!("Starting frame loop at {} fps ({:?} per frame)", clock.fps(), period);
    let mut interval_timer = tokio::time::interval(period);

    let mut last_stats_time = Local::now();
    let stats_interval = chrono::Duration::seconds(30);
    let mut frames: u64 = 0;
    let mut callbacks: u64 = 0;

    loop {
        tokio::select! {
            _ = interval_timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping");
                break;
            }
        }

        clock.update_frame_ticks();
        window.process_events();
        let report = subsystem.tick(clock.delta_time());
        frames += 1;
        callbacks += report.total() as u64;

        if subsystem.is_control_down(DeviceIndex::KEYBOARD, Key::Escape as i32) {
            info!("Escape pressed, stopping");
            break;
        }
        if !window.is_open() {
            break;
        }

        let now = Local::now();
        if now - last_stats_time > stats_interval {
            let elapsed_seconds = (now - last_stats_time).num_seconds().max(1);
            info!(
                "Engine stats: {} frames, {} callbacks in {} seconds ({:.2} fps)",
                frames,
                callbacks,
                elapsed_seconds,
                frames as f64 / elapsed_seconds as f64
            );
            frames = 0;
            callbacks = 0;
            last_stats_time = now;
        }
    }
}
