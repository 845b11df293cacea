use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{Display, DisplayApiPreference},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::GlWindow;
use log::{debug, info, warn};
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use std::{ffi::CString, num::NonZeroU32, ptr, time::Duration};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowBuilder},
};

use super::WindowSystem;
use crate::config::WindowConfig;
use crate::render::{FrameTarget, NativeGl};
use crate::utils::error::AppError;

#[cfg(target_os = "windows")]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(None)
}

#[cfg(target_os = "macos")]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::EglThenGlx(Box::new(winit::platform::x11::register_xlib_error_hook))
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    all(unix, not(any(target_os = "ios", target_os = "android")))
)))]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

/// Picks the config with the most samples. An empty set is a window
/// creation failure, not a panic.
fn best_config<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Result<C, AppError> {
    configs
        .reduce(|accum, config| {
            if samples(&config) > samples(&accum) {
                config
            } else {
                accum
            }
        })
        .ok_or_else(|| AppError::WindowCreation("no matching GL config".into()))
}

/// winit + glutin window with an OpenGL 3.3 compatibility context.
#[derive(Debug, Default)]
pub struct DesktopWindowSystem;

impl DesktopWindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for DesktopWindowSystem {
    type Target = DesktopTarget;
    type Gl = NativeGl;

    fn open(&mut self, config: &WindowConfig) -> Result<(DesktopTarget, NativeGl), AppError> {
        let event_loop = EventLoop::new().map_err(|e| AppError::WindowInit(e.to_string()))?;

        let gl_display = unsafe { Display::new(event_loop.raw_display_handle(), display_preference()) }
            .map_err(|e| AppError::WindowCreation(format!("display: {}", e)))?;

        let template = ConfigTemplateBuilder::new().with_alpha_size(8).build();
        let configs = unsafe { gl_display.find_configs(template) }
            .map_err(|e| AppError::WindowCreation(format!("configs: {}", e)))?;
        let gl_config: Config = best_config(configs, |config| config.num_samples())?;

        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);
        let window = glutin_winit::finalize_window(&event_loop, window_builder, &gl_config)
            .map_err(|e| AppError::WindowCreation(e.to_string()))?;

        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_window_handle));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| AppError::WindowCreation(format!("context: {}", e)))?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(|e| AppError::WindowCreation(format!("surface: {}", e)))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| AppError::WindowCreation(format!("make current: {}", e)))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!("Could not set swap interval: {}", e);
        }

        let gl = NativeGl::load(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        })?;
        info!("Status: OpenGL functions loaded through {}", gl_display.version_string());

        debug!(
            "Opened {}x{} window \"{}\"",
            config.width, config.height, config.title
        );

        Ok((
            DesktopTarget {
                gl_surface,
                gl_context,
                window,
                event_loop,
                close_requested: false,
            },
            gl,
        ))
    }
}

/// Open window plus its current context. Fields drop surface first, event loop last.
pub struct DesktopTarget {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    event_loop: EventLoop<()>,
    close_requested: bool,
}

impl FrameTarget for DesktopTarget {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn swap_buffers(&mut self) -> Result<(), AppError> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| AppError::Present(e.to_string()))
    }

    fn poll_events(&mut self) {
        let window_id = self.window.id();
        let close_requested = &mut self.close_requested;

        let status = self.event_loop.pump_events(Some(Duration::ZERO), |event, elwt| {
            if let Event::WindowEvent {
                window_id: id,
                event: WindowEvent::CloseRequested,
            } = event
            {
                if id == window_id {
                    debug!("Close requested");
                    *close_requested = true;
                    elwt.exit();
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with {}", code);
            self.close_requested = true;
        }
    }
}
