// SPDX-FileCopyrightText: 2022  Emmanuele Bassi
// SPDX-License-Identifier: GPL-3.0-or-later

use async_channel::Sender;
use gst::prelude::*;
use gtk::glib;
use log::{debug, error, warn};

use crate::{
    audio::{Backend, DeckAction, PlaybackState},
    error::{Error, Result},
};

/// How `jackaudiosink` wires its output ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JackConnect {
    #[default]
    None,
    Auto,
}

impl JackConnect {
    fn nick(&self) -> &'static str {
        match self {
            JackConnect::None => "none",
            JackConnect::Auto => "auto",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioSink {
    Jack(JackConnect),
    Auto,
}

pub struct GstBackend {
    pipeline: gst::Pipeline,
    decoder: gst::Element,
    _bus_watch: gst::bus::BusWatchGuard,
}

fn make_element(factory: &'static str) -> Result<gst::Element> {
    gst::ElementFactory::make(factory)
        .build()
        .map_err(|_| Error::MissingElement(factory))
}

fn make_sink(index: usize, sink: AudioSink) -> Result<gst::Element> {
    if let AudioSink::Jack(connect) = sink {
        match gst::ElementFactory::make("jackaudiosink")
            .property("client-name", format!("player-{}", index))
            .property_from_str("connect", connect.nick())
            .build()
        {
            Ok(sink) => return Ok(sink),
            Err(err) => warn!("Unable to create jackaudiosink, using autoaudiosink: {}", err),
        }
    }

    make_element("autoaudiosink")
}

impl GstBackend {
    pub fn new(index: usize, sink: AudioSink, sender: Sender<DeckAction>) -> Result<Self> {
        let pipeline = gst::Pipeline::builder()
            .name(format!("deck-{}", index + 1))
            .build();

        let decoder = make_element("uridecodebin")?;
        let convert = make_element("audioconvert")?;
        let resample = make_element("audioresample")?;
        let sink = make_sink(index, sink)?;

        pipeline.add_many([&decoder, &convert, &resample, &sink])?;
        gst::Element::link_many([&convert, &resample, &sink])?;

        let convert_weak = convert.downgrade();
        decoder.connect_pad_added(move |src, src_pad| {
            let Some(convert) = convert_weak.upgrade() else {
                return;
            };
            if let Err(err) = link_audio_pad(src, src_pad, &convert) {
                warn!("{}", err);
            }
        });

        let bus = pipeline
            .bus()
            .ok_or_else(|| glib::bool_error!("Pipeline without a bus"))?;

        let pipeline_weak = pipeline.downgrade();
        let bus_watch = bus.add_watch_local(move |_, msg| {
            let action = pipeline_weak
                .upgrade()
                .and_then(|pipeline| bus_action(&pipeline, msg));
            if let Some(action) = action {
                if let Err(e) = sender.send_blocking(action) {
                    error!("Unable to send bus message: {e}");
                }
            }
            glib::ControlFlow::Continue
        })?;

        Ok(Self {
            pipeline,
            decoder,
            _bus_watch: bus_watch,
        })
    }
}

fn link_audio_pad(src: &gst::Element, src_pad: &gst::Pad, convert: &gst::Element) -> Result<()> {
    debug!(
        "Received new pad '{}' from '{}'",
        src_pad.name(),
        src.name()
    );

    let sink_pad = convert
        .static_pad("sink")
        .ok_or_else(|| glib::bool_error!("audioconvert without a sink pad"))?;
    if sink_pad.is_linked() {
        debug!("Already linked, ignoring");
        return Ok(());
    }

    let caps = src_pad
        .current_caps()
        .unwrap_or_else(|| src_pad.query_caps(None));
    let Some(structure) = caps.structure(0) else {
        return Ok(());
    };
    if !structure.name().starts_with("audio/x-raw") {
        debug!("Pad has type '{}', which is not raw audio", structure.name());
        return Ok(());
    }

    src_pad.link(&sink_pad).map_err(Error::PadLink)?;
    debug!("Link succeeded (type '{}')", structure.name());

    Ok(())
}

// Only state changes of the pipeline itself count; child elements post
// their own transitions on the same bus.
fn bus_action(pipeline: &gst::Pipeline, msg: &gst::Message) -> Option<DeckAction> {
    use gst::MessageView;

    match msg.view() {
        MessageView::Eos(_) => Some(DeckAction::EndOfStream),
        MessageView::Error(err) => {
            error!(
                "Error received from element {}: {}",
                err.src()
                    .map(|s| s.path_string().to_string())
                    .unwrap_or_default(),
                err.error()
            );
            debug!("Debugging information: {:?}", err.debug());
            Some(DeckAction::Error(err.error().to_string()))
        }
        MessageView::StateChanged(state) => {
            if state.src() != Some(pipeline.upcast_ref::<gst::Object>()) {
                return None;
            }
            Some(DeckAction::StateChanged(
                state.old().into(),
                state.current().into(),
            ))
        }
        MessageView::Tag(tag) => {
            let tags = tag.tags();
            let title = tags.get::<gst::tags::Title>().map(|v| v.get().to_string());
            let artist = tags.get::<gst::tags::Artist>().map(|v| v.get().to_string());
            Some(DeckAction::Tags { title, artist })
        }
        _ => None,
    }
}

impl Backend for GstBackend {
    fn set_uri(&self, uri: &str) {
        self.decoder.set_property("uri", uri);
    }

    fn set_state(&self, state: PlaybackState) -> Result<()> {
        self.pipeline.set_state(state.into())?;
        Ok(())
    }

    fn seek(&self, position: gst::ClockTime) -> Result<()> {
        self.pipeline.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT | gst::SeekFlags::SKIP,
            position,
        )?;
        Ok(())
    }

    fn query_duration(&self) -> Option<gst::ClockTime> {
        self.pipeline.query_duration::<gst::ClockTime>()
    }

    fn query_position(&self) -> Option<gst::ClockTime> {
        self.pipeline.query_position::<gst::ClockTime>()
    }
}

impl Drop for GstBackend {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
