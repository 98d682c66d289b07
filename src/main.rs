//! Shipgrid entry point
//!
//! In the browser the scene draws to an HTML canvas and takes keyboard and
//! mouse input. Natively it plays an input script and prints what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use shipgrid::platform::web::{ImageCache, WebCanvas, WebTextures};
    use shipgrid::renderer::draw_scene;
    use shipgrid::sim::{Button, InputEvent, Key, Modifiers};
    use shipgrid::{Scene, Settings};

    struct App {
        scene: Scene,
        canvas: WebCanvas,
    }

    fn now_ms() -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() as u64)
            .unwrap_or(0)
    }

    fn mouse_modifiers(event: &MouseEvent) -> Modifiers {
        Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
        }
    }

    fn key_modifiers(event: &KeyboardEvent) -> Modifiers {
        Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
        }
    }

    fn mouse_button(event: &MouseEvent) -> Button {
        match event.button() {
            0 => Button::Primary,
            2 => Button::Secondary,
            _ => Button::Middle,
        }
    }

    /// Mouse position in canvas pixels with y up
    fn mouse_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Vec2 {
        let scale_x = canvas.width() as f32 / canvas.client_width().max(1) as f32;
        let scale_y = canvas.height() as f32 / canvas.client_height().max(1) as f32;
        let x = event.offset_x() as f32 * scale_x;
        let y = event.offset_y() as f32 * scale_y;
        Vec2::new(x, canvas.height() as f32 - y)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shipgrid starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let size = settings.grid().pixel_size();

        let canvas: HtmlCanvasElement = match document.get_element_by_id("canvas") {
            Some(el) => el.dyn_into().expect("not a canvas"),
            None => {
                let el: HtmlCanvasElement = document
                    .create_element("canvas")
                    .expect("create canvas")
                    .dyn_into()
                    .expect("not a canvas");
                let body = document.body().expect("no body");
                let _ = body.append_child(&el);
                el
            }
        };
        canvas.set_width(size.x as u32);
        canvas.set_height(size.y as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // Sprite is optional; ships fall back to boxes without it
        let mut images = ImageCache::new();
        if let Err(e) = images.preload(&settings.sprite_path).await {
            log::warn!("Sprite {} failed to load: {:?}", settings.sprite_path, e);
        }
        let images = Rc::new(images);

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::new(settings, seed, Box::new(WebTextures(images.clone())));
        let app = Rc::new(RefCell::new(App {
            scene,
            canvas: WebCanvas::new(ctx, size, images),
        }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Shipgrid running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = Key::from_name(&event.key()).unwrap_or(Key::Other);
                if matches!(key, Key::Space | Key::Up | Key::Down | Key::Left | Key::Right) {
                    event.prevent_default();
                }
                app.borrow_mut().scene.handle(&InputEvent::KeyDown {
                    key,
                    modifiers: key_modifiers(&event),
                });
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_name(&event.key()).unwrap_or(Key::Other);
                app.borrow_mut().scene.handle(&InputEvent::KeyUp {
                    key,
                    modifiers: key_modifiers(&event),
                });
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().scene.handle(&InputEvent::PointerDown {
                    pos: mouse_pos(&canvas_clone, &event),
                    button: mouse_button(&event),
                    modifiers: mouse_modifiers(&event),
                    time_ms: now_ms(),
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse release
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().scene.handle(&InputEvent::PointerUp {
                    pos: mouse_pos(&canvas_clone, &event),
                    button: mouse_button(&event),
                    modifiers: mouse_modifiers(&event),
                    time_ms: now_ms(),
                });
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Right click belongs to the scene, not the browser menu
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut guard = app.borrow_mut();
            let App { scene, canvas } = &mut *guard;
            scene.frame();
            draw_scene(scene, canvas);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::Read;
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};

    use shipgrid::assets::PngProbe;
    use shipgrid::platform::script::{self, ScriptRunner};
    use shipgrid::{Scene, Settings};

    const USAGE: &str = "usage: shipgrid [SCRIPT] [--seed N] [--settings PATH]";

    #[derive(Debug, Default)]
    struct Args {
        script: Option<PathBuf>,
        seed: Option<u64>,
        settings: Option<PathBuf>,
        help: bool,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    parsed.seed = Some(value.parse().with_context(|| format!("bad seed '{}'", value))?);
                }
                "--settings" => {
                    parsed.settings = Some(args.next().context("--settings needs a path")?.into());
                }
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
                path => {
                    if parsed.script.is_some() {
                        bail!("only one script allowed\n{}", USAGE);
                    }
                    parsed.script = Some(path.into());
                }
            }
        }
        Ok(parsed)
    }

    pub fn run() -> Result<()> {
        let args = parse_args(std::env::args().skip(1))?;
        if args.help {
            println!("{}", USAGE);
            return Ok(());
        }

        let settings = match &args.settings {
            Some(path) => Settings::load_file(path)?,
            None => Settings::default(),
        };

        let source = match &args.script {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading script from stdin")?;
                buf
            }
        };
        let steps = script::parse(&source)?;

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let scene = Scene::new(settings, seed, Box::new(PngProbe::new()));
        let stdout = std::io::stdout();
        let mut runner = ScriptRunner::new(scene, stdout.lock());
        runner.run(&steps)?;

        log::info!(
            "Script done after {} ms: {}",
            runner.clock_ms(),
            runner.scene.status_line()
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
