use anyhow::Context;
use uw_dehaze::dehazing::{DehazeConfig, DehazePipeline, TiffCompression};
use uw_dehaze::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting uw_dehaze...");

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "input.png".to_string());
    let output = args.next().unwrap_or_else(|| "output.tiff".to_string());

    let config = DehazeConfig::builder()
        .proportional_window(0.02)
        .compression(TiffCompression::Lzw)
        .horizontal_predictor(true)
        .build();
    config.validate().context("invalid dehazing configuration")?;
    let pipeline = DehazePipeline::new(config);

    info!("Dehazing pipeline initialized");
    info!("Window: {:?}", pipeline.config().window);
    info!("Compression: {:?}", pipeline.config().compression);

    match pipeline.convert_file(&input, &output) {
        Ok(_) => info!("Dehazing successful!"),
        Err(e) => {
            error!("Dehazing failed: {}", e);
            return Err(e).with_context(|| format!("failed to dehaze {input}"));
        }
    }

    Ok(())
}
