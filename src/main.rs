/*
 * Constellation
 *
 * Balls drift across the window and bounce off its edges. Any two balls
 * closer than the proximity threshold are joined by a line that fades out
 * as they move apart. A uniform grid keeps the pair search close to linear.
 *
 * Set RUST_LOG=info (or debug) to see rebuild and resize messages.
 */

use constellation::app;

fn main() {
    env_logger::init();

    nannou::app(app::model).update(app::update).run();
}
