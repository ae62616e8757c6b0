//! Headless showcase: runs the stock scene flow plus a widget gallery for
//! a few simulated seconds, feeding scripted input and draining the
//! engine's outputs the way a real host window would.

use glam::IVec2;

use jade_engine::scenes::{
    MainMenuScene, MainMenuStyle, OptionsMenuScene, OptionsMenuStyle, PoweredByScene,
};
use jade_engine::widgets::{
    Ftc, FtcParams, GridAlignment, LineGrid, LineGridParams, ProgressBar, ProgressBarParams,
};
use jade_engine::{
    Color, Engine, EngineConfig, InputEvent, MouseButton, Rect, Scene, FIRST_GAME_SCENE,
    MAIN_MENU_SCENE, OPTIONS_MENU_SCENE, POWERED_BY_SCENE,
};

const FRAME: f32 = 1.0 / 60.0;

/// Widget gallery the PLAY button lands on.
struct GalleryScene {
    bar: Option<ProgressBar>,
    score: Option<Ftc>,
    ticks: u32,
}

impl GalleryScene {
    fn new() -> Self {
        Self {
            bar: None,
            score: None,
            ticks: 0,
        }
    }
}

impl Scene for GalleryScene {
    fn start(&mut self, engine: &mut Engine) {
        LineGrid::new(
            engine,
            LineGridParams {
                rect: Rect::new(40, 40, 720, 520),
                cell: IVec2::new(40, 40),
                color: Color::DARK_GREY,
                horizontal_alignment: GridAlignment::Center,
                vertical_alignment: GridAlignment::Center,
                z: -10,
                ..Default::default()
            },
        );

        let mut bar = ProgressBar::new(
            engine,
            ProgressBarParams {
                position: IVec2::new(100, 100),
                length: 400,
                max_value: 100.0,
                full_bar_duration: 2.0,
                ..Default::default()
            },
        );
        bar.set_value(100.0);
        self.bar = Some(bar);

        let mut score = Ftc::new(
            engine,
            FtcParams {
                position: IVec2::new(100, 200),
                format: "Score: #  Best: #".to_string(),
                value_colors: vec![Color::JADE, Color::LIGHT_GREY],
                ..Default::default()
            },
        );
        score.set_int_value(engine, 0, 0);
        score.set_int_value(engine, 1, 9000);
        self.score = Some(score);
    }

    fn update(&mut self, engine: &mut Engine) {
        self.ticks += 1;
        if let Some(bar) = self.bar.as_mut() {
            bar.update(engine);
        }
        if let Some(score) = self.score.as_mut() {
            if self.ticks % 30 == 0 {
                let value = engine.random_number(0, 1000) as i64;
                score.set_int_value(engine, 0, value);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let mut engine = Engine::new(EngineConfig {
        app_name: "jade-showcase".to_string(),
        author: "jade".to_string(),
        copyright: "(c) 2026 jade".to_string(),
        render_resolution: IVec2::new(800, 600),
        window_size: IVec2::new(1024, 768),
        display_modes: vec![
            IVec2::new(800, 600),
            IVec2::new(1024, 768),
            IVec2::new(1920, 1080),
        ],
        show_fps: true,
        // Run stateless: nothing is read from or written to disk.
        settings_path: None,
        ..Default::default()
    });

    engine.add_scene(POWERED_BY_SCENE, PoweredByScene::new());
    engine.add_scene(
        MAIN_MENU_SCENE,
        MainMenuScene::new(MainMenuStyle {
            title: Some("JADE SHOWCASE".to_string()),
            ..Default::default()
        }),
    );
    engine.add_scene(
        OPTIONS_MENU_SCENE,
        OptionsMenuScene::new(OptionsMenuStyle::default()),
    );
    engine.add_scene(FIRST_GAME_SCENE, GalleryScene::new());

    let mut draw_commands = 0usize;
    let mut audio_commands = 0usize;
    let mut window_commands = 0usize;

    for frame in 0u32..600 {
        // Scripted input: skip the splash, then click PLAY on the menu.
        match frame {
            30 => engine.push_event(InputEvent::KeyDown { key_code: 0x20 }),
            31 => engine.push_event(InputEvent::KeyUp { key_code: 0x20 }),
            // PLAY is centered in the 800x600 layout; through the
            // letterboxed window mapping (512, 282) lands on it.
            60 => engine.push_event(InputEvent::PointerDown {
                button: MouseButton::Left,
                x: 512,
                y: 282,
            }),
            61 => engine.push_event(InputEvent::PointerUp {
                button: MouseButton::Left,
                x: 512,
                y: 282,
            }),
            _ => {}
        }

        engine.tick(FRAME);

        draw_commands += engine.draw_list().commands.len();
        audio_commands += engine.drain_audio().len();
        window_commands += engine.drain_window_commands().len();

        if engine.should_quit() {
            break;
        }
    }

    log::info!(
        "600 frames: scene {:?}, {} draw / {} audio / {} window commands",
        engine.current_scene(),
        draw_commands,
        audio_commands,
        window_commands,
    );
    engine.shutdown();
}
