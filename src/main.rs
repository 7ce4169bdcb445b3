// WASM entrypoint for Trunk.
//
// Native builds are no-ops; the page controller is behind `--features web` and `wasm32`.

fn main() {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    nim_arena_web::start();
}
