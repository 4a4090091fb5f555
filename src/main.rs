use bobble::app::CanvasApp;
use bobble::canvas::PhysicsCanvas;

fn main() {
    let canvas = PhysicsCanvas::new(1280.0, 720.0);
    if let Err(e) = CanvasApp::new(canvas).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
