use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};
use wrist_exo::render::{Camera, GpuContext, OrbitController, WristRenderer};
use wrist_exo::{
    ExoConfig, KeyCommand, RehabMotion, RehabPlayer, RehabSequence, WristJoint, WristModel,
    WristPose,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum UiAction {
    Start(RehabMotion),
    Home,
    Stop,
    ResetCamera,
}

struct App {
    window: Option<Arc<Window>>,
    context: Option<GpuContext<'static>>,
    renderer: Option<WristRenderer>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    config: ExoConfig,
    model: WristModel,
    pose: WristPose,
    player: Option<RehabPlayer>,
    camera: Camera,
    orbit: OrbitController,
    mouse_pos: (f32, f32),
    rotating: bool,
    panning: bool,
    last_frame: Instant,
    gui_hovered: bool,
}

fn key_command(code: KeyCode) -> Option<KeyCommand> {
    match code {
        KeyCode::ArrowLeft => Some(KeyCommand::Left),
        KeyCode::ArrowRight => Some(KeyCommand::Right),
        KeyCode::ArrowUp => Some(KeyCommand::Up),
        KeyCode::ArrowDown => Some(KeyCommand::Down),
        KeyCode::PageUp => Some(KeyCommand::PageUp),
        KeyCode::PageDown => Some(KeyCommand::PageDown),
        _ => None,
    }
}

impl App {
    fn new(config: ExoConfig) -> Self {
        let camera = Camera::default();
        let orbit = OrbitController::from_eye(camera.position, camera.target);

        Self {
            window: None,
            context: None,
            renderer: None,
            egui_state: None,
            egui_renderer: None,
            config,
            model: WristModel::default(),
            pose: WristPose::ZERO,
            player: None,
            camera,
            orbit,
            mouse_pos: (0.0, 0.0),
            rotating: false,
            panning: false,
            last_frame: Instant::now(),
            gui_hovered: false,
        }
    }

    fn is_playing(&self) -> bool {
        self.player.is_some()
    }

    fn start(&mut self, label: &str, planned: Result<RehabSequence, wrist_exo::TrajectoryError>) {
        match planned {
            Ok(sequence) if sequence.is_empty() => {
                log::info!("{}: nothing to do", label);
            }
            Ok(sequence) => {
                log::info!(
                    "starting {} ({} segments, {} steps each)",
                    label,
                    sequence.len(),
                    self.config.steps_per_segment()
                );
                self.player = Some(RehabPlayer::new(label, sequence, self.config.step_rate()));
            }
            Err(e) => log::warn!("cannot start {}: {}", label, e),
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Start(motion) => {
                let planned = RehabSequence::plan(motion, &self.pose, &self.config);
                self.start(motion.name(), planned);
            }
            UiAction::Home => {
                let planned = RehabSequence::home(&self.pose, &self.config);
                self.start("Home", planned);
            }
            UiAction::Stop => {
                if let Some(mut player) = self.player.take() {
                    player.stop();
                }
            }
            UiAction::ResetCamera => self.orbit.reset(),
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        if let Some(command) = key_command(code) {
            if self.is_playing() {
                log::debug!("ignoring {:?} while a motion is playing", command);
                return;
            }
            let joint = command.apply(&mut self.pose, self.config.key_increment());
            log::debug!("{:?} -> {:.1}", joint, self.pose.get(joint));
            return;
        }

        let action = match code {
            KeyCode::Digit1 => UiAction::Start(RehabMotion::FlexionExtension),
            KeyCode::Digit2 => UiAction::Start(RehabMotion::SupinationPronation),
            KeyCode::Digit3 => UiAction::Start(RehabMotion::RadialUlnar),
            KeyCode::KeyH => UiAction::Home,
            KeyCode::Space => UiAction::Stop,
            KeyCode::KeyR => UiAction::ResetCamera,
            _ => return,
        };
        if matches!(action, UiAction::Start(_) | UiAction::Home) && self.is_playing() {
            return;
        }
        self.apply(action);
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.orbit.update();
        self.orbit.update_camera(&mut self.camera);

        if let Some(player) = &mut self.player {
            if !player.advance(&mut self.pose, dt) {
                self.player = None;
            }
        }
    }

    fn controls_ui(&mut self, ctx: &egui::Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let playing = self.is_playing();
        let mut pose = self.pose;
        let mut steps = self.config.steps_per_segment();
        let mut rate = self.config.step_rate();
        let status = self
            .player
            .as_ref()
            .map(|p| (p.label().to_owned(), p.progress()));

        egui::Window::new("Wrist Controls")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Joint angles:");
                for joint in WristJoint::ALL {
                    ui.horizontal(|ui| {
                        ui.label(joint.label());
                        ui.add_enabled(
                            !playing,
                            egui::DragValue::new(pose.angle_mut(joint))
                                .speed(1.0)
                                .range(-360.0..=360.0)
                                .suffix("°"),
                        );
                    });
                }

                ui.separator();
                ui.label("Rehab:");
                for motion in RehabMotion::ALL {
                    if ui.add_enabled(!playing, egui::Button::new(motion.name())).clicked() {
                        actions.push(UiAction::Start(motion));
                    }
                }
                ui.horizontal(|ui| {
                    if ui.add_enabled(!playing, egui::Button::new("Home")).clicked() {
                        actions.push(UiAction::Home);
                    }
                    if ui.add_enabled(playing, egui::Button::new("Stop")).clicked() {
                        actions.push(UiAction::Stop);
                    }
                });

                if let Some((label, progress)) = &status {
                    ui.label(label.as_str());
                    ui.add(egui::ProgressBar::new(*progress).show_percentage());
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut steps, 5..=240).text("steps / segment"));
                ui.add(egui::Slider::new(&mut rate, 10.0..=240.0).text("steps / s"));
                if ui.button("Reset Camera").clicked() {
                    actions.push(UiAction::ResetCamera);
                }

                ui.separator();
                ui.label("Controls:");
                ui.small("Up/Down: pronation / supination");
                ui.small("Left/Right: radial / ulnar");
                ui.small("PgUp/PgDn: flexion / extension");
                ui.small("1-3: rehab motions, H: home, Space: stop");
                ui.small("Left drag: orbit, right drag: pan, scroll: zoom");
            });

        if !playing {
            self.pose = pose;
        }
        self.config.set_steps_per_segment(steps);
        if rate != self.config.step_rate() {
            self.config.set_step_rate(rate);
            if let Some(player) = &mut self.player {
                player.set_step_rate(self.config.step_rate());
            }
        }

        actions
    }

    fn render(&mut self) {
        let (Some(window), Some(egui_state)) = (self.window.clone(), self.egui_state.as_mut()) else {
            return;
        };
        let raw_input = egui_state.take_egui_input(&window);
        let egui_ctx = egui_state.egui_ctx().clone();

        let mut actions = Vec::new();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            actions = self.controls_ui(ctx);
        });
        for action in actions {
            self.apply(action);
        }

        self.gui_hovered = egui_ctx.is_pointer_over_area();

        let (Some(context), Some(renderer), Some(egui_state), Some(egui_renderer)) = (
            self.context.as_ref(),
            self.renderer.as_ref(),
            self.egui_state.as_mut(),
            self.egui_renderer.as_mut(),
        ) else {
            return;
        };

        egui_state.handle_platform_output(&window, full_output.platform_output);
        let clipped_primitives =
            egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
        }

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.surface.configure(&context.device, &context.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let frames = self.model.frames(&self.pose);
        let active = self.player.as_ref().and_then(|p| p.current_joint());
        renderer.render(context, &view, &frames, active, &self.camera);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.size.width, context.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Egui Encoder"),
        });
        egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        context.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Wrist Exoskeleton")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let context = pollster::block_on(GpuContext::new(window.clone()))?;
        self.camera.set_aspect(context.aspect_ratio());

        let renderer = WristRenderer::new(&context);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&context.device, context.config.format, None, 1, false);

        self.window = Some(window);
        self.context = Some(context);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.last_frame = Instant::now();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_graphics(event_loop) {
                log::error!("failed to initialise graphics: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            if egui_state.on_window_event(window, &event).consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(context) = &mut self.context {
                    context.resize(size);
                    self.camera.set_aspect(context.aspect_ratio());
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        if code == KeyCode::Escape {
                            event_loop.exit();
                        } else {
                            self.on_key(code);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed && !self.gui_hovered;
                match button {
                    MouseButton::Left => self.rotating = pressed,
                    MouseButton::Right => self.panning = pressed,
                    _ => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                let (dx, dy) = (x - self.mouse_pos.0, y - self.mouse_pos.1);
                self.mouse_pos = (x, y);

                if self.rotating {
                    self.orbit.rotate(dx, dy);
                } else if self.panning {
                    self.orbit.pan(-dx, dy);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if !self.gui_hovered {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                    };
                    self.orbit.zoom(scroll);
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(ExoConfig::default());
    event_loop.run_app(&mut app)?;
    Ok(())
}
