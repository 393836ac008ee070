use ringtophat::imgproc::synthetic::example_image;
use ringtophat::{ring_correlate, tophat_correlate, BoundaryMode, RingTophatError};

fn main() -> Result<(), RingTophatError> {
    env_logger::init();

    let image = example_image();
    log::info!("image shape = {:?}, sum = {}", image.dim(), image.sum());

    let tophat = tophat_correlate(image.view(), 10, BoundaryMode::Constant)?;
    log::info!("tophat sum = {}", tophat.sum());

    let ring = ring_correlate(image.view(), 10, 20, BoundaryMode::Constant)?;
    log::info!("ring sum = {}", ring.sum());

    println!("tophat[50, 30] = {}", tophat[[50, 30]]);
    println!("ring[60, 30] = {}", ring[[60, 30]]);

    Ok(())
}
