use htmlshot::{Converter, RenderConfig, StubEngine};

// Runs a conversion against the in-memory stub and prints what the engine
// was asked to do. Useful for eyeballing the marshalling without having
// libwkhtmltox around.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RenderConfig {
        transparent: true,
        format: "png".to_string(),
        screen_width: 1024,
        zoom_factor: 1.5,
        ..Default::default()
    };

    let engine = StubEngine::new();
    let probe = engine.clone();
    let converter = Converter::with_engine(config, engine)?;

    let mut image = Vec::new();
    converter.run_on_fragment("<p>Hello from the stub</p>", &mut image)?;

    let recorded = probe.recorded();
    println!("document handed to the engine:\n  {}", recorded.inputs[0]);
    println!("settings applied:");
    for (key, value) in &recorded.applied {
        println!("  {key} = {value}");
    }
    println!("output bytes: {}", image.len());

    Ok(())
}
