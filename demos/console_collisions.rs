use phys_demos::{Key, ScenarioController, ScenarioKind};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};
use std::thread::sleep;
use crossterm::{
    ExecutableCommand, QueueableCommand,
    event::{self, Event, KeyCode},
    terminal::{self, Clear, ClearType, size},
    cursor::{Hide, Show, MoveTo},
    style::{Color, Print, SetForegroundColor, ResetColor},
};

const FRAME_DURATION: Duration = Duration::from_millis(16); // ~60 FPS
const SIMULATION_DURATION: f64 = 30.0; // seconds
const BALL_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::White,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't fight with the drawing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut controller = ScenarioController::new(ScenarioKind::Collisions)?;
    let canvas = (controller.get_config().canvas_width, controller.get_config().canvas_height);

    let mut stdout = stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(Hide)?;

    let result = run(&mut controller, &mut stdout, canvas);

    stdout.execute(Show)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    controller: &mut ScenarioController,
    stdout: &mut Stdout,
    (canvas_width, canvas_height): (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = size()?;
    let to_screen = |x: f64, y: f64| {
        let sx = (x / canvas_width * width as f64).round() as u16;
        let sy = (y / canvas_height * (height - 1) as f64).round() as u16;
        (sx.min(width - 1), sy.min(height - 2))
    };
    let mut spawn_count = 0usize;

    while controller.get_time() < SIMULATION_DURATION {
        let frame_time = Instant::now();

        // Input: q quits, b drops a ball, the rest goes to the controller
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('b') => {
                        let x = 150.0 + (spawn_count * 97 % 700) as f64;
                        controller.pointer_down(x, 120.0);
                        spawn_count += 1;
                    }
                    KeyCode::Char(' ') => {
                        controller.handle_key(Key::Space);
                    }
                    KeyCode::Char(c) => {
                        controller.handle_key(Key::Char(c));
                    }
                    _ => {}
                }
            }
        }

        controller.tick()?;
        let state = controller.get_state();

        stdout.queue(Clear(ClearType::All))?;
        for (i, trail) in controller.get_trails().iter().enumerate() {
            for point in trail {
                let (x, y) = to_screen(point.x, point.y);
                stdout.queue(MoveTo(x, y))?
                      .queue(SetForegroundColor(BALL_COLORS[i % BALL_COLORS.len()]))?
                      .queue(Print('·'))?;
            }
        }
        for (i, ball) in state.bodies.iter().enumerate() {
            let (x, y) = to_screen(ball.position.x, ball.position.y);
            stdout.queue(MoveTo(x, y))?
                  .queue(SetForegroundColor(BALL_COLORS[i % BALL_COLORS.len()]))?
                  .queue(Print('●'))?;
        }

        let status = format!(
            "t = {:5.1} s | balls: {} | {} | b: drop  c: clear  r: reset  space: pause  q: quit",
            controller.get_time(),
            state.bodies.len(),
            if controller.is_paused() { "PAUSED" } else { "RUNNING" },
        );
        stdout.queue(MoveTo(0, height - 1))?
              .queue(ResetColor)?
              .queue(Print(status))?;
        stdout.flush()?;

        let elapsed = frame_time.elapsed();
        if elapsed < FRAME_DURATION {
            sleep(FRAME_DURATION - elapsed);
        }
    }

    Ok(())
}
