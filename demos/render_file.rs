use std::fs;

use htmlshot::RenderConfig;

// Renders an HTML file to a PNG through the native backend. Build with:
//    cargo run --example render_file --features native -- page.html out.png

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: render_file <input.html> [output.png]");
            std::process::exit(2);
        }
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let html = fs::read_to_string(&input)?;

    let config = RenderConfig {
        format: "png".to_string(),
        ..Default::default()
    };
    let converter = htmlshot::new_converter(config)?;
    println!("engine: wkhtmltox {}", converter.engine_version());

    let mut image = Vec::new();
    converter.run(&html, &mut image)?;
    fs::write(&output, &image)?;
    println!("wrote {} bytes to {output}", image.len());

    Ok(())
}
