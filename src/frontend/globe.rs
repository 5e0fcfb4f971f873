use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Mat4;
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl,
    WebGlShader, WebGlUniformLocation, WebglLoseContext,
};
use yew::prelude::*;

use super::browser::{browser_window, report_capability, RafScheduler, WindowListener};
use crate::error::CapabilityError;
use crate::globe::mesh::SphereMesh;
use crate::globe::session::{GlobeSession, ResizeHook, SceneSurface};
use crate::globe::{
    GlobeScene, Material, ATMOSPHERE_MATERIAL, ATMOSPHERE_RADIUS, EARTH_MATERIAL, GLOBE_RADIUS,
    LOCATIONS, MARKER_MATERIAL, MARKER_RADIUS, MARKER_SEGMENTS, SPHERE_SEGMENTS,
};

const VERTEX_SHADER: &str = r#"
attribute vec3 a_position;
attribute vec3 a_normal;
uniform mat4 u_view_projection;
uniform mat4 u_model;
varying vec3 v_normal;

void main() {
    v_normal = (u_model * vec4(a_normal, 0.0)).xyz;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform vec3 u_color;
uniform float u_opacity;
uniform float u_unlit;
uniform vec3 u_ambient;
uniform vec3 u_light_color;
uniform vec3 u_light_direction;
varying vec3 v_normal;

void main() {
    float diffuse = max(dot(normalize(v_normal), normalize(u_light_direction)), 0.0);
    vec3 lit = u_color * (u_ambient + u_light_color * diffuse);
    gl_FragColor = vec4(mix(lit, u_color, u_unlit), u_opacity);
}
"#;

const MAX_PIXEL_RATIO: f64 = 2.0;

type LiveGlobe = GlobeSession<WebGlSurface, RafScheduler, WindowResizeHook>;

/// Everything allocated on the GPU, so a failed setup can release the
/// parts it already created.
#[derive(Default)]
struct GpuResources {
    buffers: Vec<WebGlBuffer>,
    shaders: Vec<WebGlShader>,
    programs: Vec<WebGlProgram>,
}

impl GpuResources {
    fn release(&mut self, gl: &Gl) {
        for buffer in self.buffers.drain(..) {
            gl.delete_buffer(Some(&buffer));
        }
        for program in self.programs.drain(..) {
            for shader in &self.shaders {
                gl.detach_shader(&program, shader);
            }
            gl.delete_program(Some(&program));
        }
        for shader in self.shaders.drain(..) {
            gl.delete_shader(Some(&shader));
        }
    }
}

struct MeshBuffers {
    position: WebGlBuffer,
    normal: WebGlBuffer,
    index: WebGlBuffer,
    count: i32,
}

struct Uniforms {
    view_projection: WebGlUniformLocation,
    model: WebGlUniformLocation,
    color: WebGlUniformLocation,
    opacity: WebGlUniformLocation,
    unlit: WebGlUniformLocation,
    ambient: WebGlUniformLocation,
    light_color: WebGlUniformLocation,
    light_direction: WebGlUniformLocation,
}

pub struct WebGlSurface {
    gl: Gl,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    position_attr: u32,
    normal_attr: u32,
    uniforms: Uniforms,
    earth: MeshBuffers,
    atmosphere: MeshBuffers,
    marker: MeshBuffers,
    resources: GpuResources,
}

fn compile_shader(
    gl: &Gl,
    resources: &mut GpuResources,
    kind: u32,
    source: &str,
) -> Result<WebGlShader, CapabilityError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| CapabilityError::ShaderCompile("create_shader returned null".to_string()))?;
    resources.shaders.push(shader.clone());

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        Err(CapabilityError::ShaderCompile(
            gl.get_shader_info_log(&shader).unwrap_or_default(),
        ))
    }
}

fn link_program(gl: &Gl, resources: &mut GpuResources) -> Result<WebGlProgram, CapabilityError> {
    let vertex = compile_shader(gl, resources, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
    let fragment = compile_shader(gl, resources, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;

    let program = gl
        .create_program()
        .ok_or_else(|| CapabilityError::ProgramLink("create_program returned null".to_string()))?;
    resources.programs.push(program.clone());

    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        Err(CapabilityError::ProgramLink(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}

fn upload_f32(gl: &Gl, resources: &mut GpuResources, data: &[f32]) -> Result<WebGlBuffer, CapabilityError> {
    let buffer = gl.create_buffer().ok_or(CapabilityError::BufferAllocation)?;
    resources.buffers.push(buffer.clone());
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &Float32Array::from(data), Gl::STATIC_DRAW);
    Ok(buffer)
}

fn upload_mesh(gl: &Gl, resources: &mut GpuResources, mesh: &SphereMesh) -> Result<MeshBuffers, CapabilityError> {
    let position = upload_f32(gl, resources, &mesh.positions)?;
    let normal = upload_f32(gl, resources, &mesh.normals)?;

    let index = gl.create_buffer().ok_or(CapabilityError::BufferAllocation)?;
    resources.buffers.push(index.clone());
    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&index));
    gl.buffer_data_with_array_buffer_view(
        Gl::ELEMENT_ARRAY_BUFFER,
        &Uint16Array::from(mesh.indices.as_slice()),
        Gl::STATIC_DRAW,
    );

    Ok(MeshBuffers {
        position,
        normal,
        index,
        count: i32::try_from(mesh.indices.len()).map_err(|_| CapabilityError::BufferAllocation)?,
    })
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, CapabilityError> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| CapabilityError::ProgramLink(format!("missing uniform {name}")))
}

fn attribute(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<u32, CapabilityError> {
    u32::try_from(gl.get_attrib_location(program, name))
        .map_err(|_| CapabilityError::ProgramLink(format!("missing attribute {name}")))
}

fn lose_context(gl: &Gl) {
    if let Ok(Some(extension)) = gl.get_extension("WEBGL_lose_context") {
        extension.unchecked_into::<WebglLoseContext>().lose_context();
    }
}

impl WebGlSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, CapabilityError> {
        let gl = canvas
            .get_context("webgl")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<Gl>().ok())
            .ok_or(CapabilityError::WebGlUnavailable)?;

        let mut resources = GpuResources::default();
        match Self::build(&gl, &mut resources) {
            Ok((program, position_attr, normal_attr, uniforms, [earth, atmosphere, marker])) => Ok(Self {
                gl,
                canvas,
                program,
                position_attr,
                normal_attr,
                uniforms,
                earth,
                atmosphere,
                marker,
                resources,
            }),
            Err(err) => {
                resources.release(&gl);
                lose_context(&gl);
                Err(err)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn build(
        gl: &Gl,
        resources: &mut GpuResources,
    ) -> Result<(WebGlProgram, u32, u32, Uniforms, [MeshBuffers; 3]), CapabilityError> {
        let program = link_program(gl, resources)?;
        let uniforms = Uniforms {
            view_projection: uniform(gl, &program, "u_view_projection")?,
            model: uniform(gl, &program, "u_model")?,
            color: uniform(gl, &program, "u_color")?,
            opacity: uniform(gl, &program, "u_opacity")?,
            unlit: uniform(gl, &program, "u_unlit")?,
            ambient: uniform(gl, &program, "u_ambient")?,
            light_color: uniform(gl, &program, "u_light_color")?,
            light_direction: uniform(gl, &program, "u_light_direction")?,
        };
        let position_attr = attribute(gl, &program, "a_position")?;
        let normal_attr = attribute(gl, &program, "a_normal")?;

        let meshes = [
            upload_mesh(gl, resources, &SphereMesh::uv(GLOBE_RADIUS, SPHERE_SEGMENTS))?,
            upload_mesh(gl, resources, &SphereMesh::uv(ATMOSPHERE_RADIUS, SPHERE_SEGMENTS))?,
            upload_mesh(gl, resources, &SphereMesh::uv(MARKER_RADIUS, MARKER_SEGMENTS))?,
        ];

        Ok((program, position_attr, normal_attr, uniforms, meshes))
    }

    fn draw(&self, mesh: &MeshBuffers, model: Mat4, material: Material, unlit: bool) {
        let gl = &self.gl;

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&mesh.position));
        gl.vertex_attrib_pointer_with_i32(self.position_attr, 3, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(self.position_attr);

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&mesh.normal));
        gl.vertex_attrib_pointer_with_i32(self.normal_attr, 3, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(self.normal_attr);

        gl.uniform_matrix4fv_with_f32_array(Some(&self.uniforms.model), false, &model.to_cols_array());
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.color), &material.color);
        gl.uniform1f(Some(&self.uniforms.opacity), material.opacity);
        gl.uniform1f(Some(&self.uniforms.unlit), if unlit { 1.0 } else { 0.0 });

        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&mesh.index));
        gl.draw_elements_with_i32(Gl::TRIANGLES, mesh.count, Gl::UNSIGNED_SHORT, 0);
    }
}

impl SceneSurface for WebGlSurface {
    fn resize(&mut self, width: u32, height: u32) {
        let ratio = browser_window()
            .map(|win| win.device_pixel_ratio())
            .unwrap_or(1.0)
            .min(MAX_PIXEL_RATIO);
        let pixel_width = (f64::from(width) * ratio).round() as u32;
        let pixel_height = (f64::from(height) * ratio).round() as u32;

        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
        self.gl.viewport(0, 0, pixel_width as i32, pixel_height as i32);
    }

    fn render(&mut self, scene: &GlobeScene) {
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.enable(Gl::DEPTH_TEST);

        let (ambient_color, ambient_intensity) = scene.ambient();
        let (light_color, light_intensity, direction) = scene.directional();
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.uniforms.view_projection),
            false,
            &scene.camera.view_projection().to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(
            Some(&self.uniforms.ambient),
            &ambient_color.map(|channel| channel * ambient_intensity),
        );
        gl.uniform3fv_with_f32_array(
            Some(&self.uniforms.light_color),
            &light_color.map(|channel| channel * light_intensity),
        );
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.light_direction), &direction.to_array());

        gl.disable(Gl::BLEND);
        gl.depth_mask(true);
        self.draw(&self.earth, scene.earth_model(), EARTH_MATERIAL, false);
        for marker in &scene.markers {
            self.draw(&self.marker, scene.marker_model(marker), MARKER_MATERIAL, true);
        }

        if ATMOSPHERE_MATERIAL.is_translucent() {
            gl.enable(Gl::BLEND);
            gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);
            gl.depth_mask(false);
        }
        self.draw(&self.atmosphere, scene.atmosphere_model(), ATMOSPHERE_MATERIAL, false);
        gl.depth_mask(true);
    }

    fn dispose(&mut self) {
        self.resources.release(&self.gl);
        lose_context(&self.gl);
    }
}

/// Window `resize` listener that re-measures the globe container.
pub struct WindowResizeHook {
    listener: Option<WindowListener>,
}

impl ResizeHook for WindowResizeHook {
    fn detach(&mut self) {
        self.listener = None;
    }
}

fn container_size(container: &Element) -> (u32, u32) {
    let width = container.client_width().max(1) as u32;
    let height = container.client_height().max(1) as u32;
    (width, height)
}

fn mount_globe(container: &NodeRef, canvas: &NodeRef) -> Result<Rc<RefCell<LiveGlobe>>, CapabilityError> {
    let container = container
        .cast::<Element>()
        .ok_or_else(|| CapabilityError::MissingElement("globe container".to_string()))?;
    let canvas = canvas
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| CapabilityError::MissingElement("globe canvas".to_string()))?;

    let surface = WebGlSurface::new(canvas)?;
    let frames = RafScheduler::new();
    let requester = frames.requester();
    let session = Rc::new(RefCell::new(GlobeSession::new(
        GlobeScene::new(&LOCATIONS),
        surface,
        frames,
    )));

    let weak: Weak<RefCell<LiveGlobe>> = Rc::downgrade(&session);
    requester.set_callback(move |_timestamp| {
        if let Some(session) = weak.upgrade() {
            session.borrow_mut().on_frame();
        }
    });

    let weak: Weak<RefCell<LiveGlobe>> = Rc::downgrade(&session);
    let measured = container.clone();
    let listener = WindowListener::new("resize", move |_| {
        if let Some(session) = weak.upgrade() {
            let (width, height) = container_size(&measured);
            session.borrow_mut().resize(width, height);
        }
    })?;
    session.borrow_mut().attach_resize_hook(WindowResizeHook {
        listener: Some(listener),
    });

    let (width, height) = container_size(&container);
    session.borrow_mut().start(width, height);

    Ok(session)
}

#[function_component(Globe)]
pub fn globe() -> Html {
    let container = use_node_ref();
    let canvas = use_node_ref();

    {
        let container = container.clone();
        let canvas = canvas.clone();
        use_effect_with((), move |_| {
            let session = match mount_globe(&container, &canvas) {
                Ok(session) => Some(session),
                Err(err) => {
                    report_capability(&err, "globe");
                    None
                }
            };

            move || {
                if let Some(session) = session {
                    session.borrow_mut().teardown();
                }
            }
        });
    }

    html! {
        <div ref={container} class="globe-container">
            <canvas ref={canvas} class="globe-canvas" aria-label="Rotating globe with our partner cities"></canvas>
        </div>
    }
}
