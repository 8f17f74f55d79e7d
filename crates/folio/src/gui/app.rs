use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::Page;
use crate::gui::contact::{ContactInit, ContactMsg, ContactPage};
use crate::gui::hero::{HeroInit, HeroMsg, HeroOutput, HeroPage};
use crate::gui::theme;
use crate::theme::{Element, ThemeMode};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use tokio::runtime::Handle;

pub struct AppModel {
    pub mode: ThemeMode,
    pub page: Page,
    hero: Controller<HeroPage>,
    contact: Controller<ContactPage>,
}

#[derive(Debug)]
pub enum AppMsg {
    Navigate(Page),
    ToggleTheme,
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ShowHero => AppMsg::Navigate(Page::Hero),
            AppEvent::ShowContact => AppMsg::Navigate(Page::Contact),
            AppEvent::ToggleTheme => AppMsg::ToggleTheme,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::Quit => AppMsg::Quit,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Handle, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Folio"),
            set_default_width: 1280,
            set_default_height: 860,
            add_css_class: "folio-window",

            #[wrap(Some)]
            set_titlebar = &gtk::HeaderBar {
                pack_start = &gtk::Button {
                    set_label: "Home",
                    add_css_class: "flat",
                    connect_clicked => AppMsg::Navigate(Page::Hero),
                },
                pack_start = &gtk::Button {
                    set_label: "Contact",
                    add_css_class: "flat",
                    connect_clicked => AppMsg::Navigate(Page::Contact),
                },
                pack_end = &gtk::Button {
                    #[watch]
                    set_icon_name: if model.mode.is_dark() {
                        "weather-clear-symbolic"
                    } else {
                        "weather-clear-night-symbolic"
                    },
                    set_tooltip_text: Some("Toggle dark mode"),
                    connect_clicked => AppMsg::ToggleTheme,
                },
            },

            #[name = "stack"]
            gtk::Stack {
                set_transition_type: gtk::StackTransitionType::Crossfade,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, handle, rx) = init;
        let mode = config.theme.mode;

        theme::load_css();

        let hero = HeroPage::builder()
            .launch(HeroInit {
                config: config.clone(),
                handle,
                mode,
            })
            .forward(sender.input_sender(), |out| match out {
                HeroOutput::GetInTouch => AppMsg::Navigate(Page::Contact),
            });
        let contact = ContactPage::builder()
            .launch(ContactInit {
                config: config.contact.clone(),
                mode,
            })
            .detach();

        let model = AppModel {
            mode,
            page: Page::default(),
            hero,
            contact,
        };

        let widgets = view_output!();

        widgets
            .stack
            .add_named(model.hero.widget(), Some(Page::Hero.as_ref()));
        widgets
            .stack
            .add_named(model.contact.widget(), Some(Page::Contact.as_ref()));
        widgets.stack.set_visible_child_name(model.page.as_ref());
        theme::apply_class(&root, Element::Page, model.mode);

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
            AppMsg::Navigate(page) => {
                self.page = page;
            }
            AppMsg::ToggleTheme => {
                self.set_mode(self.mode.toggle());
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.set_mode(new_config.theme.mode);
                    self.contact
                        .emit(ContactMsg::Reconfigure(Box::new(new_config.contact.clone())));
                    self.hero.emit(HeroMsg::Reconfigure(Box::new(new_config)));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }

    fn post_view() {
        stack.set_visible_child_name(model.page.as_ref());
        theme::apply_class(&*window, Element::Page, model.mode);
    }
}

impl AppModel {
    fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.hero.emit(HeroMsg::SetTheme(mode));
        self.contact.emit(ContactMsg::SetTheme(mode));
        log::debug!("Theme switched to {}", mode);
    }
}
