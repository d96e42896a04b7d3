//! WebGL2 backend for the 3D scenes.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation};

use super::{dom, frame};
use crate::geom::Size;
use crate::scene::{Camera, DrawBatch, Primitive, Scene};

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform float u_point_size;
uniform float u_scale;
void main() {
    vec4 mv = u_model_view * vec4(a_position, 1.0);
    gl_Position = u_projection * mv;
    gl_PointSize = max(1.0, u_point_size * u_scale / -mv.z);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 out_color;
void main() {
    out_color = u_color;
}
"#;

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile failed: {info}")))
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!("program link failed: {info}")))
    }
}

struct Uniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

/// Owns the context, one program and one streaming vertex buffer.
pub struct GlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    uniforms: Uniforms,
    buffer: WebGlBuffer,
    scratch: Vec<f32>,
}

impl GlRenderer {
    /// `Ok(None)` when the browser has no WebGL2 for this canvas.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let attrs = Object::new();
        Reflect::set(&attrs, &"alpha".into(), &JsValue::TRUE)?;
        Reflect::set(&attrs, &"antialias".into(), &JsValue::TRUE)?;
        let Some(context) = canvas.get_context_with_context_options("webgl2", &attrs)? else {
            return Ok(None);
        };
        let gl: GL = context.dyn_into()?;

        let vertex = compile(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link(&gl, &vertex, &fragment)?;
        gl.use_program(Some(&program));

        let uniforms = Uniforms {
            model_view: gl.get_uniform_location(&program, "u_model_view"),
            projection: gl.get_uniform_location(&program, "u_projection"),
            point_size: gl.get_uniform_location(&program, "u_point_size"),
            scale: gl.get_uniform_location(&program, "u_scale"),
            color: gl.get_uniform_location(&program, "u_color"),
        };

        let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));
        let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);

        gl.enable(GL::BLEND);
        gl.blend_func_separate(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA, GL::ONE, GL::ONE_MINUS_SRC_ALPHA);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Some(Self {
            canvas,
            gl,
            uniforms,
            buffer,
            scratch: Vec::new(),
        }))
    }

    /// Sizes the drawing buffer for the canvas' CSS box and returns that box.
    pub fn resize(&mut self) -> Result<Size, JsValue> {
        let ratio = dom::window()?.device_pixel_ratio().max(1.0);
        let size = Size::new(
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
        );
        let (w, h) = ((size.width * ratio) as u32, (size.height * ratio) as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.gl.viewport(0, 0, w as i32, h as i32);
        Ok(size)
    }

    pub fn render(&mut self, camera: &Camera, batch: &DrawBatch<'_>) {
        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        gl.uniform_matrix4fv_with_f32_array(self.uniforms.projection.as_ref(), false, &camera.projection().to_cols_array());
        gl.uniform1f(self.uniforms.scale.as_ref(), self.canvas.height() as f32 * 0.5);

        let view = camera.view();
        for call in &batch.calls {
            if call.vertices.is_empty() {
                continue;
            }
            self.scratch.clear();
            self.scratch.extend(call.vertices.iter().flat_map(|v| v.to_array()));
            let data = Float32Array::from(self.scratch.as_slice());
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::DYNAMIC_DRAW);

            let model_view = view * call.model;
            gl.uniform_matrix4fv_with_f32_array(self.uniforms.model_view.as_ref(), false, &model_view.to_cols_array());
            gl.uniform1f(self.uniforms.point_size.as_ref(), call.point_size);
            gl.uniform4fv_with_f32_array(self.uniforms.color.as_ref(), &call.color.to_f32());

            let mode = match call.primitive {
                Primitive::Lines => GL::LINES,
                Primitive::Points => GL::POINTS,
            };
            gl.draw_arrays(mode, 0, call.vertices.len() as i32);
        }
    }
}

/// Builds a scene for `canvas` and renders it every frame. A canvas without
/// WebGL2 is skipped.
pub fn mount<S, F>(canvas: HtmlCanvasElement, build: F) -> Result<(), JsValue>
where
    S: Scene + 'static,
    F: FnOnce(Size) -> S,
{
    let id = canvas.id();
    let Some(mut renderer) = GlRenderer::new(canvas)? else {
        log::warn!("WebGL2 unavailable for #{id}, scene skipped");
        return Ok(());
    };
    let size = renderer.resize()?;
    let scene = Rc::new(RefCell::new(build(size)));
    let renderer = Rc::new(RefCell::new(renderer));
    let window = dom::window()?;

    {
        let scene = scene.clone();
        let renderer = renderer.clone();
        dom::listen(&window, "resize", move |_| match renderer.borrow_mut().resize() {
            Ok(size) => scene.borrow_mut().resize(size),
            Err(err) => log::warn!("resize failed: {err:?}"),
        })?;
    }
    {
        let scene = scene.clone();
        let win = window.clone();
        dom::listen(&window, "mousemove", move |event| {
            if let Some(at) = dom::pointer_ratio(&win, &event) {
                scene.borrow_mut().pointer(at);
            }
        })?;
    }

    log::info!("scene started on #{id}");
    frame::animate(move |dt| {
        let mut scene = scene.borrow_mut();
        scene.advance(dt);
        let mut batch = DrawBatch::default();
        scene.draw(&mut batch);
        renderer.borrow_mut().render(scene.camera(), &batch);
        true
    })
}
