use crate::config;
use crate::events::AppEvent;
use crate::gui::canvas::CairoRenderer;
use crate::gui::theme::{self, ThemeColors};
use dialkit::render::{RenderAdapter, RenderUpdate, Scene};
use dialkit::{DialWidget, Point};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppModel {
    pub widget: DialWidget,
    pub renderer: Rc<RefCell<CairoRenderer>>,
    pub config_path: Option<PathBuf>,
    pub drawing_area: gtk::DrawingArea,
    pub heading: gtk::Label,
    pub legend: gtk::Box,
    pub value_labels: Vec<gtk::Label>,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        DialWidget,
        Option<PathBuf>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dials"),
            set_resizable: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "container"]
            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 24,
                set_margin_all: 16,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: false,
                    set_vexpand: false,

                    // start point plus offset is the pointer in drawing-area coordinates
                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y)));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::PointerUp);
                        },
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_valign: gtk::Align::Center,
                    add_css_class: "slider__base",

                    #[name = "heading"]
                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "heading",
                    },

                    #[name = "legend"]
                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 6,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (widget, config_path, rx) = init;

        theme::load_css();

        let model = AppModel {
            widget,
            renderer: Rc::new(RefCell::new(CairoRenderer::default())),
            config_path,
            drawing_area: gtk::DrawingArea::default(),
            heading: gtk::Label::default(),
            legend: gtk::Box::default(),
            value_labels: Vec::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.heading = widgets.heading.clone();
        model.legend = widgets.legend.clone();
        widgets
            .container
            .set_widget_name(model.widget.appearance().container.id());

        let renderer_draw = model.renderer.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = renderer_draw.borrow().draw(cr, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.rebuild();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown(point) => {
                let update = self.widget.pointer_down(point);
                self.present(update);
            }
            AppMsg::PointerMove(point) => {
                let update = self.widget.pointer_move(point);
                self.present(update);
            }
            AppMsg::PointerUp => {
                self.widget.pointer_up();
            }
            AppMsg::ConfigReload => {
                let reloaded = config::load(self.config_path.as_deref())
                    .and_then(|c| c.build().map_err(anyhow::Error::from));
                match reloaded {
                    Ok(widget) => {
                        self.widget = widget;
                        self.rebuild();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
            AppMsg::Quit => {
                relm4::main_application().quit();
            }
        }
    }
}

impl AppModel {
    /// Hands the whole scene to the renderer and recreates the legend.
    fn rebuild(&mut self) {
        let scene = self.widget.scene();
        if let Err(e) = self.renderer.borrow_mut().build(&scene) {
            log::error!("Failed to build scene: {}", e);
        }

        let size = scene.size.ceil() as i32;
        self.drawing_area.set_content_width(size);
        self.drawing_area.set_content_height(size);

        match &scene.heading {
            Some(text) => {
                self.heading.set_label(text);
                self.heading.set_visible(true);
            }
            None => self.heading.set_visible(false),
        }

        self.rebuild_legend(&scene);
        self.drawing_area.queue_draw();
    }

    fn rebuild_legend(&mut self, scene: &Scene) {
        while let Some(child) = self.legend.first_child() {
            self.legend.remove(&child);
        }

        self.value_labels = scene
            .legend
            .iter()
            .map(|entry| {
                let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);

                let swatch = gtk::Label::new(None);
                swatch.set_markup(&format!(
                    "<span foreground=\"{}\">\u{25A0}</span>",
                    entry.color
                ));
                swatch.add_css_class("colorSquare");

                let name = gtk::Label::new(Some(entry.name.as_str()));
                name.set_hexpand(true);
                name.set_xalign(0.0);

                let value = gtk::Label::new(Some(&entry.text));
                value.set_xalign(1.0);
                value.add_css_class("sliderValue");

                row.append(&swatch);
                row.append(&name);
                row.append(&value);
                self.legend.append(&row);
                value
            })
            .collect();
    }

    fn present(&mut self, update: Option<RenderUpdate>) {
        let Some(update) = update else {
            return;
        };

        if let Err(e) = self.renderer.borrow_mut().apply(&update) {
            log::error!("Failed to apply update: {}", e);
            return;
        }
        if let Some(label) = self.value_labels.get(update.dial) {
            label.set_label(&update.legend_text);
        }
        self.drawing_area.queue_draw();
    }
}
