use crate::config::ContactConfig;
use crate::contact::{
    Ack, ContactForm, ContactInfo, DETAIL_STAGGER, FIELD_DELAY, FIELD_STAGGER, FormError,
    FormField, FormState, Notice, SimulatedSubmitter, SubmitPhase,
};
use crate::gui::theme::ThemeBinder;
use crate::gui::{self, animate_entrance};
use crate::motion::{Direction, Entrance};
use crate::theme::{Element, ThemeMode};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::time::Duration;
use strum::IntoEnumIterator;

pub struct ContactInit {
    pub config: ContactConfig,
    pub mode: ThemeMode,
}

pub struct ContactPage {
    form: ContactForm<SimulatedSubmitter>,
    info: ContactInfo,
    mode: ThemeMode,
    hint: Option<String>,
}

#[derive(Debug)]
pub enum ContactMsg {
    Edit(FormField, String),
    Submit,
    SetTheme(ThemeMode),
    Reconfigure(Box<ContactConfig>),
    OpenLink(String),
}

pub struct ContactWidgets {
    fields: gtk::Box,
    entries: Vec<(FormField, gtk::Entry)>,
    message: gtk::TextBuffer,
    submit: gtk::Button,
    notice: gtk::Label,
    info_column: gtk::Box,
    themed: ThemeBinder,
    info_themed: ThemeBinder,
}

fn field_block(
    field: FormField,
    input: &impl IsA<gtk::Widget>,
    themed: &mut ThemeBinder,
) -> gtk::Box {
    let block = gtk::Box::new(gtk::Orientation::Vertical, 8);
    let label = gtk::Label::new(Some(field.label()));
    label.set_xalign(0.0);
    themed.bind(&label, Element::FormLabel);
    themed.bind(input, Element::Input);
    block.append(&label);
    block.append(input);
    block
}

fn build_info(
    column: &gtk::Box,
    info: &ContactInfo,
    themed: &mut ThemeBinder,
    sender: &ComponentSender<ContactPage>,
) {
    while let Some(child) = column.first_child() {
        column.remove(&child);
    }
    themed.clear();

    for (i, detail) in info.details.iter().enumerate() {
        let card = gtk::Button::new();
        card.add_css_class("flat");
        themed.bind(&card, Element::ContactCard);

        let row = gtk::Box::new(gtk::Orientation::Horizontal, 16);
        let chip = gtk::Image::from_icon_name(detail.kind.icon_name());
        chip.set_pixel_size(24);
        themed.bind(&chip, Element::IconChip);
        row.append(&chip);

        let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
        let title = gtk::Label::new(Some(&detail.kind.to_string()));
        title.set_xalign(0.0);
        themed.bind(&title, Element::CardTitle);
        let value = gtk::Label::new(Some(&detail.value));
        value.set_xalign(0.0);
        themed.bind(&value, Element::CardValue);
        text.append(&title);
        text.append(&value);
        row.append(&text);
        card.set_child(Some(&row));

        match detail.href() {
            Some(href) => {
                let sender = sender.clone();
                card.connect_clicked(move |_| sender.input(ContactMsg::OpenLink(href.clone())));
            }
            None => card.set_can_target(false),
        }

        column.append(&card);
        animate_entrance(
            &card,
            Entrance::staggered(Direction::FromLeft, i, DETAIL_STAGGER),
        );
    }

    let socials = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    socials.set_margin_top(16);
    for social in &info.socials {
        let button = gtk::Button::with_label(&social.kind.to_string());
        themed.bind(&button, Element::ContactCard);
        let (sender, url) = (sender.clone(), social.url.clone());
        button.connect_clicked(move |_| sender.input(ContactMsg::OpenLink(url.clone())));
        socials.append(&button);
    }
    column.append(&socials);
}

fn field_entrance(field: FormField) -> Entrance {
    let direction = match field {
        FormField::Name => Direction::FromLeft,
        FormField::Email => Direction::FromRight,
        FormField::Subject | FormField::Message => Direction::Up,
    };
    let index = FormField::iter().position(|f| f == field).unwrap_or(0);
    Entrance::new(direction, FIELD_DELAY + FIELD_STAGGER * index as u32)
}

impl ContactPage {
    fn render(&self, widgets: &mut ContactWidgets) {
        let FormState {
            draft,
            phase,
            notice,
        } = self.form.state();
        let idle = phase == SubmitPhase::Idle;

        widgets.fields.set_sensitive(idle);
        widgets.submit.set_sensitive(idle);
        widgets
            .submit
            .set_label(if idle { "Send Message" } else { "⌛" });

        for (field, entry) in &widgets.entries {
            let value = draft.get(*field);
            if entry.text().as_str() != value {
                entry.set_text(value);
            }
        }
        let (start, end) = widgets.message.bounds();
        if widgets.message.text(&start, &end, false).as_str() != draft.message {
            widgets.message.set_text(&draft.message);
        }

        widgets.notice.remove_css_class("folio-notice-error");
        widgets.notice.remove_css_class("folio-notice-sent");
        let text = match (&self.hint, notice) {
            (Some(hint), _) => {
                widgets.notice.add_css_class("folio-notice-error");
                hint.clone()
            }
            (None, Some(Notice::Sent)) => {
                widgets.notice.add_css_class("folio-notice-sent");
                "Thanks! Your message has been sent.".to_string()
            }
            (None, Some(Notice::Failed(reason))) => {
                widgets.notice.add_css_class("folio-notice-error");
                reason
            }
            (None, None) => String::new(),
        };
        widgets.notice.set_visible(!text.is_empty());
        widgets.notice.set_text(&text);
    }
}

impl Component for ContactPage {
    type Init = ContactInit;
    type Input = ContactMsg;
    type Output = ();
    type CommandOutput = Result<Ack, FormError>;
    type Root = gtk::Box;
    type Widgets = ContactWidgets;

    fn init_root() -> Self::Root {
        gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(48)
            .margin_top(64)
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
        let model = ContactPage {
            form: ContactForm::new(SimulatedSubmitter::new(init.config.submit_delay())),
            info: init.config.info(),
            mode: init.mode,
            hint: None,
        };
        let mut themed = ThemeBinder::default();

        // header
        let header = gtk::Box::new(gtk::Orientation::Vertical, 16);
        let pill = gtk::Label::new(Some("Get in Touch"));
        pill.add_css_class("folio-accent");
        let title = gtk::Label::new(None);
        title.set_markup("Let's <span foreground=\"#a78bfa\">Connect</span>");
        title.add_css_class("folio-title");
        themed.bind(&title, Element::Heading);
        let blurb = gtk::Label::new(Some(
            "Have a project in mind or want to collaborate? Feel free to reach out!",
        ));
        blurb.set_wrap(true);
        themed.bind(&blurb, Element::Body);
        header.append(&pill);
        header.append(&title);
        header.append(&blurb);
        root.append(&header);
        animate_entrance(&header, Entrance::new(Direction::Up, Duration::ZERO));

        let columns = gtk::Box::new(gtk::Orientation::Horizontal, 48);
        columns.set_homogeneous(true);

        // form
        let form_column = gtk::Box::new(gtk::Orientation::Vertical, 24);
        let fields = gtk::Box::new(gtk::Orientation::Vertical, 24);
        let pair = gtk::Box::new(gtk::Orientation::Horizontal, 24);
        pair.set_homogeneous(true);

        let mut entries = Vec::new();
        for field in [FormField::Name, FormField::Email, FormField::Subject] {
            let entry = gtk::Entry::new();
            if field == FormField::Email {
                entry.set_input_purpose(gtk::InputPurpose::Email);
            }
            {
                let sender = sender.clone();
                entry.connect_changed(move |e| {
                    sender.input(ContactMsg::Edit(field, e.text().to_string()));
                });
            }
            let block = field_block(field, &entry, &mut themed);
            animate_entrance(&block, field_entrance(field));
            match field {
                FormField::Subject => fields.append(&block),
                _ => pair.append(&block),
            }
            entries.push((field, entry));
        }
        fields.prepend(&pair);

        let message_view = gtk::TextView::new();
        message_view.set_wrap_mode(gtk::WrapMode::WordChar);
        message_view.set_height_request(140);
        let message = message_view.buffer();
        {
            let sender = sender.clone();
            message.connect_changed(move |buf| {
                let (start, end) = buf.bounds();
                let text = buf.text(&start, &end, false).to_string();
                sender.input(ContactMsg::Edit(FormField::Message, text));
            });
        }
        let block = field_block(FormField::Message, &message_view, &mut themed);
        animate_entrance(&block, field_entrance(FormField::Message));
        fields.append(&block);
        form_column.append(&fields);

        let submit = gtk::Button::with_label("Send Message");
        submit.add_css_class("folio-gradient-button");
        {
            let sender = sender.clone();
            submit.connect_clicked(move |_| sender.input(ContactMsg::Submit));
        }
        form_column.append(&submit);

        let notice = gtk::Label::new(None);
        notice.set_wrap(true);
        notice.set_visible(false);
        form_column.append(&notice);
        columns.append(&form_column);

        // contact info
        let info_column = gtk::Box::new(gtk::Orientation::Vertical, 24);
        let mut info_themed = ThemeBinder::default();
        build_info(&info_column, &model.info, &mut info_themed, &sender);
        columns.append(&info_column);
        root.append(&columns);

        themed.apply(model.mode);
        info_themed.apply(model.mode);

        let widgets = ContactWidgets {
            fields,
            entries,
            message,
            submit,
            notice,
            info_column,
            themed,
            info_themed,
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
            ContactMsg::Edit(field, value) => {
                // echoes of render() syncing the widgets
                if self.form.draft().get(field) == value {
                    return;
                }
                if !self.form.update(field, value) {
                    return;
                }
                if self.hint.is_some() && self.form.draft().missing_fields().is_empty() {
                    self.hint = None;
                }
                self.form.dismiss_notice();
            }
            ContactMsg::Submit => match self.form.submit() {
                Ok(pending) => {
                    self.hint = None;
                    sender.oneshot_command(pending);
                }
                Err(FormError::MissingFields(missing)) => {
                    let names: Vec<_> = missing.iter().map(|f| f.label()).collect();
                    self.hint = Some(format!("Please fill in: {}", names.join(", ")));
                }
                Err(e) => log::warn!("Submit ignored: {}", e),
            },
            ContactMsg::SetTheme(mode) => {
                self.mode = mode;
                widgets.themed.apply(mode);
                widgets.info_themed.apply(mode);
            }
            ContactMsg::Reconfigure(config) => {
                self.info = config.info();
                build_info(
                    &widgets.info_column,
                    &self.info,
                    &mut widgets.info_themed,
                    &sender,
                );
                widgets.info_themed.apply(self.mode);

                // an in-flight send keeps the old form until it settles
                if self.form.phase() == SubmitPhase::Idle {
                    let draft = self.form.draft();
                    self.form.close();
                    self.form = ContactForm::new(SimulatedSubmitter::new(config.submit_delay()));
                    for field in FormField::iter() {
                        self.form.update(field, draft.get(field));
                    }
                }
            }
            ContactMsg::OpenLink(uri) => gui::open_uri(&uri),
        }
        self.render(widgets);
    }

    fn update_cmd_with_view(
        &mut self,
        widgets: &mut Self::Widgets,
        result: Self::CommandOutput,
        _sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match result {
            Ok(ack) => log::debug!("Contact form settled with ack {}", ack.id),
            Err(FormError::Stale) => return,
            Err(e) => log::debug!("Contact form settled with error: {}", e),
        }
        self.render(widgets);
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        self.form.close();
        log::debug!("Contact page torn down");
    }
}
