//! cpu-gl demo: renders the hello triangle for a number of frames and writes
//! each presented frame to disk.

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use cpu_gl::config::{load_config, DemoConfig};
use cpu_gl::export::FrameExporter;
use cpu_gl::gl::*;
use cpu_gl::rasterizer::Vec4;

#[derive(Debug, Parser)]
#[command(name = "cpu-gl", version, about = "Render the hello triangle on the CPU")]
struct Args {
    /// RON file with demo settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the number of frames
    #[arg(long)]
    frames: Option<u32>,
    /// Override the output directory
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => DemoConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    run(&config)
}

fn run(config: &DemoConfig) -> anyhow::Result<()> {
    let mut gl = Context::new();
    let window = gl.create_window(config.width, config.height, &config.title);
    gl.set_frame_sink(Box::new(FrameExporter::new(
        &config.output_dir,
        &config.file_prefix,
        config.format,
    )));

    info!("Renderer: {}", gl.get_string(GL_RENDERER));
    info!("Version: {}", gl.get_string(GL_VERSION));

    if config.depth_test {
        gl.enable(GL_DEPTH_TEST);
        gl.depth_func(GL_LESS);
    }

    let points = config.vertex_data();
    let vbo = gl.gen_buffers(1)[0];
    gl.bind_buffer(GL_ARRAY_BUFFER, vbo);
    gl.buffer_data(GL_ARRAY_BUFFER, bytemuck::cast_slice(&points), GL_STATIC_DRAW);

    let vao = gl.gen_vertex_arrays(1)[0];
    gl.bind_vertex_array(vao);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer(0, 3, GL_FLOAT, GL_FALSE, 0, 0);

    let vs = gl.create_shader(GL_VERTEX_SHADER);
    gl.shader_source(vs, PassThrough);
    gl.compile_shader(vs);
    let fs = gl.create_shader(GL_FRAGMENT_SHADER);
    gl.shader_source(fs, SolidColor(Vec4::from(config.fill_color)));
    gl.compile_shader(fs);

    let program = gl.create_program();
    gl.attach_shader(program, fs);
    gl.attach_shader(program, vs);
    gl.link_program(program);

    let [r, g, b, a] = config.clear_color;
    gl.clear_color(r, g, b, a);

    let err = gl.get_error();
    if err != GL_NO_ERROR {
        bail!("pipeline setup failed with error {:#06x}", err);
    }

    let progress = ProgressBar::new(config.frames as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} frames")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for _ in 0..config.frames {
        gl.clear(GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT);
        gl.use_program(program);
        gl.bind_vertex_array(vao);
        gl.draw_arrays(GL_TRIANGLES, 0, 3);

        gl.swap_buffers(window)?;
        progress.inc(1);
    }
    progress.finish();

    info!(
        "wrote {} frames to {}",
        config.frames,
        config.output_dir.display()
    );
    Ok(())
}
