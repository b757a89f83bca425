// Minimal smoke run of the effect engine, music synthesis and narration

use std::sync::Arc;

use vidforge::{
    audio::{MusicSynthesizer, NarrationRequest, NarrationSynthesizer, UnavailableSpeechProvider, VoiceHint},
    effects::{FrameEffectEngine, LookRegistry},
    video::EncoderSettings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Testing VidForge core functionality");

    // 1. Look registry
    let registry = LookRegistry::new();
    let available = registry.available_looks();
    println!("\n1. Available looks: {:?}", available);

    // 2. Frame effects
    let settings = EncoderSettings::default();
    let mut frame = settings.blank_frame()?;
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let r = (x * 255 / frame.width()) as u8;
            let g = (y * 255 / frame.height()) as u8;
            frame.set_pixel(x, y, [r, g, 160, 255]);
        }
    }

    let chain = registry
        .get("cinematic")
        .ok_or_else(|| anyhow::anyhow!("cinematic look missing"))?;
    let mut engine = FrameEffectEngine::with_seed(2024);
    engine.apply_chain(&mut frame, chain)?;
    println!("\n2. Applied {} effects to a {}x{} frame", chain.len(), frame.width(), frame.height());

    match frame.save_png("minimal_test_output.png") {
        Ok(()) => println!("   Output saved to: minimal_test_output.png"),
        Err(e) => println!("   Could not save file: {}", e),
    }

    // 3. Music
    let synth = MusicSynthesizer::new(44100);
    let music = synth.synthesize_music("upbeat", 1.0)?;
    println!(
        "\n3. Music: {} channels x {} samples, peak {:.4}",
        music.number_of_channels(),
        music.len(),
        music.peak()
    );

    // 4. Narration without a speech engine
    let narrator = NarrationSynthesizer::new(Arc::new(UnavailableSpeechProvider));
    match narrator
        .synthesize_narration(NarrationRequest::new("Hello from VidForge", VoiceHint::Female))
        .await
    {
        Ok(voice) => println!("\n4. Narration: {:.2}s", voice.duration()),
        Err(e) => println!("\n4. Narration unavailable: {}", e.user_message()),
    }

    println!(
        "\nEncoder settings: {}x{} @ {} fps, {} {}",
        settings.width, settings.height, settings.fps, settings.format, settings.codec
    );
    Ok(())
}
