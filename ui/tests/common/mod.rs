use egui_kittest::Harness;
use qrgen_business::QrGenConfig;
use qrgen_ui::QrGenApp;
use qrgen_ui::state::State;

/// Frames to run after an input event so commands flush and the next frame
/// reflects them.
#[allow(unused)]
pub const UI_PROPAGATION_FRAMES: usize = 3;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(unused)]
pub fn app_harness<'a>() -> Harness<'a, QrGenApp> {
    app_harness_with(QrGenConfig::default())
}

#[allow(unused)]
pub fn app_harness_with<'a>(config: QrGenConfig) -> Harness<'a, QrGenApp> {
    init_logger();
    let app = QrGenApp::builder().state(State::new(config)).build();
    Harness::builder()
        .with_size(egui::vec2(480.0, 720.0))
        .build_eframe(|_| app)
}

#[allow(unused)]
pub fn step_frames<T>(harness: &mut Harness<'_, T>, frames: usize) {
    for _ in 0..frames {
        harness.step();
    }
}
