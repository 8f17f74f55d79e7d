use crate::config::{Config, ProfileConfig, RingConfig};
use crate::contact::SocialKind;
use crate::gui::theme::ThemeBinder;
use crate::gui::{self, animate_entrance};
use crate::hero::Typewriter;
use crate::motion::{Direction, Entrance};
use crate::ring::{BADGE_RADIUS, RotationDriver, TechnologyItem};
use crate::sys::ticker::Ticker;
use crate::theme::{Element, ThemeMode};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::runtime::Handle;

pub mod canvas;

pub use canvas::RingCanvas;

pub struct HeroInit {
    pub config: Config,
    pub handle: Handle,
    pub mode: ThemeMode,
}

pub struct HeroPage {
    profile: ProfileConfig,
    ring: RingConfig,
    technologies: Vec<TechnologyItem>,
    projects_url: Option<String>,
    handle: Handle,
    mode: ThemeMode,
    driver: RotationDriver,
    typewriter: Typewriter,
    typed: String,
    type_ticker: Option<Ticker>,
    canvas: Rc<RefCell<RingCanvas>>,
}

#[derive(Debug)]
pub enum HeroMsg {
    Rotated,
    Type,
    SetTheme(ThemeMode),
    Reconfigure(Box<Config>),
    OpenProjects,
}

#[derive(Debug)]
pub enum HeroOutput {
    GetInTouch,
}

pub struct HeroWidgets {
    heading: gtk::Label,
    role: gtk::Label,
    typed: gtk::Label,
    intro: gtk::Label,
    projects: gtk::Button,
    canvas: gtk::DrawingArea,
    themed: ThemeBinder,
}

fn projects_url(config: &Config) -> Option<String> {
    config
        .contact
        .socials
        .iter()
        .find(|s| s.kind == SocialKind::GitHub)
        .map(|s| s.url.clone())
}

fn heading_markup(name: &str) -> String {
    format!(
        "Hello, I'm <span foreground=\"#a78bfa\">{}</span>",
        glib::markup_escape_text(name)
    )
}

fn canvas_side(ring: &RingConfig) -> i32 {
    (2.0 * (ring.radius + BADGE_RADIUS) + 16.0).ceil() as i32
}

impl HeroPage {
    fn start_driver(&mut self, sender: &ComponentSender<Self>) {
        let input = sender.input_sender().clone();
        self.driver = RotationDriver::new(self.technologies.clone(), self.ring.geometry());
        self.driver
            .start(&self.handle, self.ring.period(), move |_| input.emit(HeroMsg::Rotated));
    }

    fn start_typewriter(&mut self, sender: &ComponentSender<Self>) {
        let input = sender.input_sender().clone();
        self.typewriter = Typewriter::new(&self.profile.phrases, self.profile.hold_steps());
        self.typed.clear();
        self.type_ticker = Some(Ticker::spawn(
            &self.handle,
            self.profile.type_delay(),
            move || input.emit(HeroMsg::Type),
        ));
    }

    fn stop(&mut self) {
        self.driver.stop();
        if let Some(mut ticker) = self.type_ticker.take() {
            ticker.stop();
        }
    }
}

impl Component for HeroPage {
    type Init = HeroInit;
    type Input = HeroMsg;
    type Output = HeroOutput;
    type CommandOutput = ();
    type Root = gtk::Box;
    type Widgets = HeroWidgets;

    fn init_root() -> Self::Root {
        gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(64)
            .homogeneous(true)
            .margin_top(96)
            .margin_bottom(64)
            .margin_start(48)
            .margin_end(48)
            .build()
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let HeroInit {
            config,
            handle,
            mode,
        } = init;

        let mut model = HeroPage {
            projects_url: projects_url(&config),
            profile: config.profile,
            ring: config.ring,
            technologies: config.technologies,
            handle,
            mode,
            driver: RotationDriver::new(Vec::new(), Default::default()),
            typewriter: Typewriter::new(Vec::<String>::new(), 0),
            typed: String::new(),
            type_ticker: None,
            canvas: Rc::new(RefCell::new(RingCanvas::new(
                &Default::default(),
                Duration::ZERO,
                mode,
                None,
            ))),
        };
        model.start_driver(&sender);
        model.start_typewriter(&sender);
        model.canvas.borrow_mut().reload(
            &model.driver.snapshot(),
            model.ring.animation(),
            model.profile.avatar.as_deref(),
        );

        let mut themed = ThemeBinder::default();

        // text column
        let column = gtk::Box::new(gtk::Orientation::Vertical, 24);
        column.set_valign(gtk::Align::Center);

        let role = gtk::Label::new(Some(&model.profile.role));
        role.set_halign(gtk::Align::Start);
        role.add_css_class("folio-accent");
        column.append(&role);

        let heading = gtk::Label::new(None);
        heading.set_markup(&heading_markup(&model.profile.name));
        heading.set_halign(gtk::Align::Start);
        heading.add_css_class("folio-title");
        themed.bind(&heading, Element::Heading);
        column.append(&heading);

        let typed = gtk::Label::new(None);
        typed.set_halign(gtk::Align::Start);
        typed.add_css_class("title-1");
        themed.bind(&typed, Element::Heading);
        column.append(&typed);

        let intro = gtk::Label::new(Some(&model.profile.intro));
        intro.set_wrap(true);
        intro.set_max_width_chars(56);
        intro.set_xalign(0.0);
        themed.bind(&intro, Element::Body);
        column.append(&intro);

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 16);
        let contact = gtk::Button::with_label("Get in Touch");
        contact.add_css_class("folio-gradient-button");
        {
            let sender = sender.clone();
            contact.connect_clicked(move |_| {
                let _ = sender.output(HeroOutput::GetInTouch);
            });
        }
        actions.append(&contact);

        let projects = gtk::Button::with_label("View Projects");
        themed.bind(&projects, Element::OutlineButton);
        {
            let sender = sender.clone();
            projects.connect_clicked(move |_| sender.input(HeroMsg::OpenProjects));
        }
        actions.append(&projects);
        column.append(&actions);

        root.append(&column);
        animate_entrance(&column, Entrance::new(Direction::Up, Duration::ZERO));

        // ring
        let side = canvas_side(&model.ring);
        let canvas = gtk::DrawingArea::new();
        canvas.set_content_width(side);
        canvas.set_content_height(side);
        canvas.set_halign(gtk::Align::Center);
        canvas.set_valign(gtk::Align::Center);

        let ring_draw = model.canvas.clone();
        canvas.set_draw_func(move |_, cr, width, height| {
            if let Err(e) = ring_draw.borrow().draw(cr, width as f64, height as f64) {
                log::error!("Drawing error: {}", e);
            }
        });
        let ring_tick = model.canvas.clone();
        canvas.add_tick_callback(move |area, _| {
            if ring_tick.borrow().is_animating() {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });
        root.append(&canvas);

        themed.apply(model.mode);

        let widgets = HeroWidgets {
            heading,
            role,
            typed,
            intro,
            projects,
            canvas,
            themed,
        };

        ComponentParts { model, widgets }
    }

    fn update_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        msg: Self::Input,
        sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            HeroMsg::Rotated => {
                self.canvas.borrow_mut().rotate(&self.driver.snapshot());
                widgets.canvas.queue_draw();
            }
            HeroMsg::Type => {
                let text = self.typewriter.advance();
                if text != self.typed {
                    widgets.typed.set_text(&text);
                    self.typed = text;
                }
            }
            HeroMsg::SetTheme(mode) => {
                self.mode = mode;
                widgets.themed.apply(mode);
                self.canvas.borrow_mut().set_mode(mode);
                widgets.canvas.queue_draw();
            }
            HeroMsg::Reconfigure(config) => {
                self.stop();
                self.projects_url = projects_url(&config);
                let Config {
                    profile,
                    ring,
                    technologies,
                    ..
                } = *config;
                self.profile = profile;
                self.ring = ring;
                self.technologies = technologies;

                self.start_driver(&sender);
                self.start_typewriter(&sender);
                self.canvas.borrow_mut().reload(
                    &self.driver.snapshot(),
                    self.ring.animation(),
                    self.profile.avatar.as_deref(),
                );

                widgets.role.set_text(&self.profile.role);
                widgets.heading.set_markup(&heading_markup(&self.profile.name));
                widgets.intro.set_text(&self.profile.intro);
                widgets.typed.set_text("");
                let side = canvas_side(&self.ring);
                widgets.canvas.set_content_width(side);
                widgets.canvas.set_content_height(side);
                widgets.canvas.queue_draw();
            }
            HeroMsg::OpenProjects => {
                if let Some(url) = &self.projects_url {
                    gui::open_uri(url);
                }
            }
        }
        widgets.projects.set_sensitive(self.projects_url.is_some());
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.stop();
        log::debug!("Hero page torn down");
    }
}
