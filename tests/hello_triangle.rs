//! End-to-end: the hello triangle at 640x480, captured through a frame sink

use cpu_gl::export::{FrameRecorder, RecordedFrame};
use cpu_gl::gl::*;
use cpu_gl::rasterizer::{Color, Vec4};
use cpu_gl::window::WindowHandle;

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

fn build_scene(gl: &mut Context, fill: Vec4) -> (WindowHandle, Handle, Handle) {
    let window = gl.create_window(WIDTH, HEIGHT, "Hello Triangle");

    gl.enable(GL_DEPTH_TEST);
    gl.depth_func(GL_LESS);

    let points: [f32; 9] = [
        0.0, 0.5, 0.0,
        0.5, -0.5, 0.0,
        -0.5, -0.5, 0.0,
    ];
    let vbo = gl.gen_buffers(1)[0];
    gl.bind_buffer(GL_ARRAY_BUFFER, vbo);
    gl.buffer_data(GL_ARRAY_BUFFER, bytemuck::cast_slice(&points), GL_STATIC_DRAW);

    let vao = gl.gen_vertex_arrays(1)[0];
    gl.bind_vertex_array(vao);
    gl.enable_vertex_attrib_array(0);
    gl.bind_buffer(GL_ARRAY_BUFFER, vbo);
    gl.vertex_attrib_pointer(0, 3, GL_FLOAT, GL_FALSE, 0, 0);

    let vs = gl.create_shader(GL_VERTEX_SHADER);
    gl.shader_source(vs, shader_fn(|_, input, out, _| out[0] = input[0]));
    gl.compile_shader(vs);
    let fs = gl.create_shader(GL_FRAGMENT_SHADER);
    gl.shader_source(fs, SolidColor(fill));
    gl.compile_shader(fs);

    let program = gl.create_program();
    gl.attach_shader(program, fs);
    gl.attach_shader(program, vs);
    gl.link_program(program);

    gl.clear_color(0.7, 0.6, 0.8, 1.0);
    assert_eq!(gl.get_error(), GL_NO_ERROR);
    (window, program, vao)
}

fn render_frame(gl: &mut Context, window: WindowHandle, program: Handle, vao: Handle) {
    gl.clear(GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT);
    gl.use_program(program);
    gl.bind_vertex_array(vao);
    gl.draw_arrays(GL_TRIANGLES, 0, 3);
    gl.swap_buffers(window).unwrap();
}

fn pixel(frame: &RecordedFrame, x: usize, y: usize) -> u32 {
    frame.pixels[y * frame.width + x]
}

#[test]
fn test_triangle_inside_bounds_clear_color_outside() {
    let mut gl = Context::new();
    let recorder = FrameRecorder::new();
    gl.set_frame_sink(Box::new(recorder.clone()));

    let fill = Color::with_alpha(127, 0, 127, 255).to_argb();
    let clear = Color::from_f32(0.7, 0.6, 0.8, 1.0).to_argb();
    let (window, program, vao) = build_scene(&mut gl, Vec4::new(0.5, 0.0, 0.5, 1.0));
    render_frame(&mut gl, window, program, vao);

    let frame = recorder.frame(0).unwrap();
    assert_eq!((frame.width, frame.height), (WIDTH, HEIGHT));

    // Screen-space vertices: (320, 360), (480, 120), (160, 120)
    let mut filled = 0;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let p = pixel(&frame, x, y);
            let in_bounds = (160..480).contains(&x) && (120..360).contains(&y);
            if in_bounds {
                assert!(p == fill || p == clear, "unexpected value {:#x} at ({}, {})", p, x, y);
            } else {
                assert_eq!(p, clear, "pixel ({}, {}) outside the triangle bounds", x, y);
            }
            if p == fill {
                filled += 1;
            }
        }
    }

    // Centroid and points near each vertex are covered
    assert_eq!(pixel(&frame, 320, 200), fill);
    assert_eq!(pixel(&frame, 320, 350), fill);
    assert_eq!(pixel(&frame, 470, 125), fill);
    assert_eq!(pixel(&frame, 170, 125), fill);
    // Outside the slanted edges but inside the bounding box
    assert_eq!(pixel(&frame, 170, 350), clear);
    assert_eq!(pixel(&frame, 470, 350), clear);

    // Area of the triangle is 160 * 240 = 38400 pixels
    assert!((37_500..=39_300).contains(&filled), "filled {}", filled);
}

#[test]
fn test_frames_alternate_between_buffers() {
    let mut gl = Context::new();
    let recorder = FrameRecorder::new();
    gl.set_frame_sink(Box::new(recorder.clone()));
    let (window, program, vao) = build_scene(&mut gl, Vec4::new(1.0, 1.0, 1.0, 1.0));

    render_frame(&mut gl, window, program, vao);
    // No redraw: the next two swaps present the untouched buffer, then the drawn one again
    gl.swap_buffers(window).unwrap();
    gl.swap_buffers(window).unwrap();

    let frames = recorder.frames();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], frames[2]);
    assert_ne!(frames[0], frames[1]);
    assert!(frames[1].pixels.iter().all(|&p| p == 0));
}

#[test]
fn test_repeated_frames_are_identical() {
    let mut gl = Context::new();
    let recorder = FrameRecorder::new();
    gl.set_frame_sink(Box::new(recorder.clone()));
    let (window, program, vao) = build_scene(&mut gl, Vec4::new(0.5, 0.0, 0.5, 1.0));

    for _ in 0..4 {
        render_frame(&mut gl, window, program, vao);
    }
    let frames = recorder.frames();
    assert_eq!(frames.len(), 4);
    assert!(frames.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(gl.get_error(), GL_NO_ERROR);
}
