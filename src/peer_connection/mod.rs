
mod channel;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;
use util::marshal::*;

pub use channel::{ChannelInfo, ChannelState};
use channel::Channel;

use crate::error::{Error, Result};
use crate::message::message_channel_ack::*;
use crate::message::message_channel_open_request::*;
use crate::message::message_channel_open_response::*;
use crate::message::*;
use crate::transport::notification::*;
use crate::transport::*;

/// Default bound of the channel table.
pub const DEFAULT_MAX_CHANNELS: usize = 100;
/// Default bound of the per-direction stream index tables.
pub const DEFAULT_MAX_STREAMS: usize = 100;

/// Config bounds the channel table and the stream index tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_channels: usize,
    pub max_streams: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_channels: DEFAULT_MAX_CHANNELS,
            max_streams: DEFAULT_MAX_STREAMS,
        }
    }
}

/// A user message delivered by an open data channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChannelMessage {
    pub channel_id: u32,
    pub is_string: bool,
    pub data: Bytes,
}

pub type OnMessageHdlrFn = Box<
    dyn (FnMut(DataChannelMessage) -> Pin<Box<dyn Future<Output = ()> + Send + 'static>>)
        + Send
        + Sync,
>;

/// Snapshot of the association and every non-closed channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub association: SctpStatus,
    pub channels: Vec<ChannelInfo>,
}

/// PeerConnection multiplexes bidirectional data channels onto the streams
/// of one SCTP association.
///
/// Each channel occupies one incoming and one outgoing stream and is
/// negotiated with a three-message handshake (open request, open response,
/// ack) carried on the Control payload protocol identifier. Closing a
/// channel resets its outgoing stream; the peer reciprocates by resetting
/// its own side, at which point the slot returns to the free pool.
///
/// The owner of the transport's receive side feeds deliveries into
/// [`PeerConnection::handle_transport_event`]; everything else is driven by
/// the public API. All channel state is serialized behind one lock.
pub struct PeerConnection {
    internal: Mutex<PeerConnectionInternal>,

    on_message_handler: Arc<Mutex<Option<OnMessageHdlrFn>>>,

    // stats
    messages_sent: AtomicUsize,
    messages_received: AtomicUsize,
    bytes_sent: AtomicUsize,
    bytes_received: AtomicUsize,
}

impl PeerConnection {
    pub fn new(transport: Arc<dyn SctpTransport + Send + Sync>, config: Config) -> Self {
        Self {
            internal: Mutex::new(PeerConnectionInternal::new(transport, config)),
            on_message_handler: Arc::new(Mutex::new(None)),
            messages_sent: AtomicUsize::default(),
            messages_received: AtomicUsize::default(),
            bytes_sent: AtomicUsize::default(),
            bytes_received: AtomicUsize::default(),
        }
    }

    /// OnMessage sets the handler invoked for every user message delivered
    /// by an open channel.
    pub async fn on_message(&self, f: OnMessageHdlrFn) {
        let mut handler = self.on_message_handler.lock().await;
        *handler = Some(f);
    }

    /// Opens a new channel towards the peer and returns its id.
    ///
    /// If no outgoing stream is available yet the channel stays in
    /// `Connecting` until the transport grants more streams; the open
    /// request is sent from the stream-change handler at that point.
    pub async fn open_channel(
        &self,
        unordered: bool,
        reliability_type: ReliabilityType,
        reliability_value: u32,
    ) -> Result<u32> {
        let mut internal = self.internal.lock().await;
        internal
            .open_channel(unordered, reliability_type, reliability_value)
            .await
    }

    /// Sends one user message on the given channel.
    ///
    /// Permitted while the channel is `Connecting` (the message is ordered
    /// behind the open request on the same stream) or `Open`.
    pub async fn send_user_message(
        &self,
        channel_id: u32,
        data: &Bytes,
        is_string: bool,
    ) -> Result<usize> {
        let n = {
            let mut internal = self.internal.lock().await;
            internal.send_user_message(channel_id, data, is_string).await?
        };
        self.messages_sent.fetch_add(1, Ordering::SeqCst);
        self.bytes_sent.fetch_add(n, Ordering::SeqCst);
        Ok(n)
    }

    /// Starts closing an open channel by resetting its outgoing stream.
    /// Completion is observed via the peer's reciprocal reset.
    pub async fn close_channel(&self, channel_id: u32) -> Result<()> {
        let mut internal = self.internal.lock().await;
        internal.close_channel(channel_id).await
    }

    /// Reports the association status and every non-closed channel.
    pub async fn status(&self) -> Result<Status> {
        let internal = self.internal.lock().await;
        internal.status().await
    }

    /// Entry point for everything the transport delivers.
    pub async fn handle_transport_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::Message {
                stream_id,
                ppid,
                payload,
            } => self.handle_message(payload, ppid, stream_id).await,
            TransportEvent::Notification(notification) => {
                self.handle_notification(notification).await
            }
        }
    }

    /// Demultiplexes one message delivered on an incoming stream.
    ///
    /// Errors on this path are never surfaced; malformed or unexpected
    /// messages are logged and dropped.
    pub async fn handle_message(
        &self,
        payload: Bytes,
        ppid: PayloadProtocolIdentifier,
        stream_id: u16,
    ) {
        let delivered = {
            let mut internal = self.internal.lock().await;
            internal.handle_message(&payload, ppid, stream_id).await
        };

        // The table lock is released before the handler runs so that the
        // handler may call back into this connection.
        if let Some(msg) = delivered {
            self.messages_received.fetch_add(1, Ordering::SeqCst);
            self.bytes_received.fetch_add(msg.data.len(), Ordering::SeqCst);

            let mut handler = self.on_message_handler.lock().await;
            if let Some(f) = &mut *handler {
                f(msg).await;
            }
        }
    }

    /// Applies one association-level notification.
    pub async fn handle_notification(&self, notification: Notification) {
        let mut internal = self.internal.lock().await;
        internal.handle_notification(notification).await;
    }

    /// MessagesSent returns the number of user messages sent
    pub fn messages_sent(&self) -> usize {
        self.messages_sent.load(Ordering::SeqCst)
    }

    /// MessagesReceived returns the number of user messages received
    pub fn messages_received(&self) -> usize {
        self.messages_received.load(Ordering::SeqCst)
    }

    /// BytesSent returns the number of user payload bytes sent
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent.load(Ordering::SeqCst)
    }

    /// BytesReceived returns the number of user payload bytes received
    pub fn bytes_received(&self) -> usize {
        self.bytes_received.load(Ordering::SeqCst)
    }
}

struct PeerConnectionInternal {
    config: Config,
    channels: Vec<Channel>,
    // Dense per-direction indexes from stream id to channel slot. Entry 0
    // stays empty: stream 0 is reserved.
    i_stream_channel: Vec<Option<usize>>,
    o_stream_channel: Vec<Option<usize>>,
    // Outgoing stream ids awaiting a batched reset request, no duplicates.
    pending_resets: Vec<u16>,
    transport: Arc<dyn SctpTransport + Send + Sync>,
}

impl PeerConnectionInternal {
    fn new(transport: Arc<dyn SctpTransport + Send + Sync>, config: Config) -> Self {
        Self {
            config,
            channels: (0..config.max_channels)
                .map(|id| Channel::new(id as u32))
                .collect(),
            i_stream_channel: vec![None; config.max_streams],
            o_stream_channel: vec![None; config.max_streams],
            pending_resets: Vec::new(),
            transport,
        }
    }

    fn find_channel_by_i_stream(&self, i_stream: u16) -> Option<usize> {
        self.i_stream_channel.get(i_stream as usize).copied().flatten()
    }

    fn find_channel_by_o_stream(&self, o_stream: u16) -> Option<usize> {
        self.o_stream_channel.get(o_stream as usize).copied().flatten()
    }

    fn find_free_channel(&self) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| c.state == ChannelState::Closed)
    }

    /// Picks the lowest unbound outgoing stream id, or `None` when every
    /// negotiated stream is taken.
    async fn find_free_o_stream(&self) -> Option<u16> {
        let status = match self.transport.status().await {
            Ok(status) => status,
            Err(err) => {
                log::warn!("failed to query association status: {err}");
                return None;
            }
        };
        let limit = std::cmp::min(status.outbound_streams as usize, self.config.max_streams);
        // stream id 0 is reserved
        (1..limit)
            .find(|&i| self.o_stream_channel[i].is_none())
            .map(|i| i as u16)
    }

    /// Asks the transport for as many extra outgoing streams as there are
    /// connecting channels still without one, capped by the table bound.
    async fn request_more_o_streams(&self) {
        let mut needed = self
            .channels
            .iter()
            .filter(|c| c.state == ChannelState::Connecting && c.o_stream == 0)
            .count();
        let status = match self.transport.status().await {
            Ok(status) => status,
            Err(err) => {
                log::warn!("failed to query association status: {err}");
                return;
            }
        };
        if status.outbound_streams as usize + needed > self.config.max_streams {
            needed = self
                .config
                .max_streams
                .saturating_sub(status.outbound_streams as usize);
        }
        if needed == 0 {
            return;
        }
        if let Err(err) = self.transport.add_streams(0, needed as u16).await {
            log::warn!("failed to request {needed} more outgoing streams: {err}");
        }
    }

    async fn send_open_request_message(
        &self,
        o_stream: u16,
        unordered: bool,
        reliability_type: ReliabilityType,
        reliability_value: u32,
    ) -> Result<usize> {
        let mut flags = 0;
        if unordered {
            flags |= FLAG_OUT_OF_ORDER_ALLOWED;
        }
        let msg = Message::DataChannelOpenRequest(DataChannelOpenRequest {
            channel_type: ChannelType::from(reliability_type),
            flags,
            reliability_params: reliability_value as u16,
            priority: 0,
            label: Vec::new(),
        })
        .marshal()?;

        self.transport
            .send(
                o_stream,
                &msg,
                PayloadProtocolIdentifier::Control,
                SendOptions {
                    end_of_record: true,
                    ..Default::default()
                },
            )
            .await
    }

    async fn send_open_response_message(&self, o_stream: u16, i_stream: u16) -> Result<usize> {
        let msg = Message::DataChannelOpenResponse(DataChannelOpenResponse {
            error: 0,
            flags: 0,
            reverse_stream: i_stream,
        })
        .marshal()?;

        self.transport
            .send(
                o_stream,
                &msg,
                PayloadProtocolIdentifier::Control,
                SendOptions {
                    end_of_record: true,
                    ..Default::default()
                },
            )
            .await
    }

    async fn send_open_ack_message(&self, o_stream: u16) -> Result<usize> {
        let msg = Message::DataChannelAck(DataChannelAck {}).marshal()?;

        self.transport
            .send(
                o_stream,
                &msg,
                PayloadProtocolIdentifier::Control,
                SendOptions {
                    end_of_record: true,
                    ..Default::default()
                },
            )
            .await
    }

    async fn open_channel(
        &mut self,
        unordered: bool,
        reliability_type: ReliabilityType,
        reliability_value: u32,
    ) -> Result<u32> {
        if reliability_type == ReliabilityType::Reliable && reliability_value != 0 {
            return Err(Error::InvalidReliabilityValue(reliability_value));
        }
        let idx = self.find_free_channel().ok_or(Error::ErrNoFreeChannel)?;

        match self.find_free_o_stream().await {
            None => {
                // Park the channel in Connecting with no stream so the next
                // stream grant picks it up.
                let channel = &mut self.channels[idx];
                channel.state = ChannelState::Connecting;
                channel.unordered = unordered;
                channel.reliability_type = reliability_type;
                channel.reliability_value = reliability_value;
                channel.o_stream = 0;
                let id = channel.id;
                self.request_more_o_streams().await;
                Ok(id)
            }
            Some(o_stream) => {
                // A failed send leaves the slot closed and untouched.
                self.send_open_request_message(
                    o_stream,
                    unordered,
                    reliability_type,
                    reliability_value,
                )
                .await?;
                let channel = &mut self.channels[idx];
                channel.state = ChannelState::Connecting;
                channel.unordered = unordered;
                channel.reliability_type = reliability_type;
                channel.reliability_value = reliability_value;
                channel.o_stream = o_stream;
                let id = channel.id;
                self.o_stream_channel[o_stream as usize] = Some(idx);
                Ok(id)
            }
        }
    }

    async fn send_user_message(
        &mut self,
        channel_id: u32,
        data: &Bytes,
        is_string: bool,
    ) -> Result<usize> {
        if channel_id as usize >= self.channels.len() {
            return Err(Error::InvalidChannelId(channel_id));
        }
        let channel = &self.channels[channel_id as usize];
        if channel.state != ChannelState::Open && channel.state != ChannelState::Connecting {
            return Err(Error::ErrChannelNotOpen(channel_id));
        }
        if channel.o_stream == 0 {
            // Still waiting for an outgoing stream grant.
            return Err(Error::ErrNoFreeStream);
        }

        let ppid = if is_string {
            PayloadProtocolIdentifier::DomString
        } else {
            PayloadProtocolIdentifier::Binary
        };
        let mut options = SendOptions {
            end_of_record: true,
            ..Default::default()
        };
        // While the handshake is in flight the message must stay ordered
        // behind the open request on the same stream.
        if channel.state == ChannelState::Open && channel.unordered {
            options.unordered = true;
        }
        if channel.reliability_type != ReliabilityType::Reliable {
            options.reliability_type = channel.reliability_type;
            options.reliability_value = channel.reliability_value;
        }

        self.transport
            .send(channel.o_stream, data, ppid, options)
            .await
    }

    /// Queues an outgoing stream for the next batched reset request.
    fn reset_outgoing_stream(&mut self, o_stream: u16) {
        // duplicates are suppressed; the list stays small
        if !self.pending_resets.contains(&o_stream) {
            self.pending_resets.push(o_stream);
        }
    }

    /// Flushes every queued outgoing-stream reset in one request. On
    /// failure the queue is kept and retried on the next notification.
    async fn send_outgoing_stream_reset(&mut self) {
        if self.pending_resets.is_empty() {
            return;
        }
        match self.transport.reset_streams(&self.pending_resets).await {
            Ok(()) => self.pending_resets.clear(),
            Err(err) => {
                log::warn!("failed to reset outgoing streams: {err}");
            }
        }
    }

    async fn close_channel(&mut self, channel_id: u32) -> Result<()> {
        if channel_id as usize >= self.channels.len() {
            return Err(Error::InvalidChannelId(channel_id));
        }
        if self.channels[channel_id as usize].state != ChannelState::Open {
            return Ok(());
        }
        let o_stream = self.channels[channel_id as usize].o_stream;
        self.reset_outgoing_stream(o_stream);
        self.send_outgoing_stream_reset().await;
        self.channels[channel_id as usize].state = ChannelState::Closing;
        Ok(())
    }

    async fn handle_open_request_message(
        &mut self,
        req: &DataChannelOpenRequest,
        i_stream: u16,
    ) {
        if i_stream == 0 || i_stream as usize >= self.config.max_streams {
            log::debug!("dropping open request on reserved or out-of-range stream {i_stream}");
            return;
        }
        if let Some(idx) = self.find_channel_by_i_stream(i_stream) {
            log::debug!(
                "dropping open request on stream {i_stream}: channel {} is in state {}",
                self.channels[idx].id,
                self.channels[idx].state
            );
            return;
        }
        let idx = match self.find_free_channel() {
            Some(idx) => idx,
            None => {
                log::debug!("dropping open request on stream {i_stream}: channel table exhausted");
                return;
            }
        };

        let reliability_type = req.channel_type.reliability_type();
        let reliability_value = u32::from(req.reliability_params);
        let unordered = req.is_out_of_order_allowed();
        let o_stream = self.find_free_o_stream().await;

        {
            let channel = &mut self.channels[idx];
            channel.state = ChannelState::Connecting;
            channel.unordered = unordered;
            channel.reliability_type = reliability_type;
            channel.reliability_value = reliability_value;
            channel.i_stream = i_stream;
        }
        self.i_stream_channel[i_stream as usize] = Some(idx);

        match o_stream {
            None => self.request_more_o_streams().await,
            Some(o_stream) => {
                match self.send_open_response_message(o_stream, i_stream).await {
                    Ok(_) => {
                        self.channels[idx].o_stream = o_stream;
                        self.o_stream_channel[o_stream as usize] = Some(idx);
                    }
                    Err(err) => {
                        // The channel keeps its incoming binding; the
                        // stream-change handler retries the response.
                        log::warn!("failed to send open response on stream {o_stream}: {err}");
                    }
                }
            }
        }
    }

    async fn handle_open_response_message(
        &mut self,
        rsp: &DataChannelOpenResponse,
        i_stream: u16,
    ) {
        let o_stream = rsp.reverse_stream;
        let idx = match self.find_channel_by_o_stream(o_stream) {
            Some(idx) => idx,
            None => {
                log::debug!(
                    "dropping open response on stream {i_stream}: no channel on outgoing stream {o_stream}"
                );
                return;
            }
        };
        if self.channels[idx].state != ChannelState::Connecting {
            log::debug!(
                "dropping open response on stream {i_stream}: channel {} is in state {}",
                self.channels[idx].id,
                self.channels[idx].state
            );
            return;
        }
        if i_stream == 0 || i_stream as usize >= self.config.max_streams {
            log::debug!("dropping open response on reserved or out-of-range stream {i_stream}");
            return;
        }
        if self.find_channel_by_i_stream(i_stream).is_some() {
            log::debug!(
                "dropping open response on stream {i_stream}: incoming stream already bound"
            );
            return;
        }

        self.channels[idx].i_stream = i_stream;
        self.channels[idx].state = ChannelState::Open;
        self.i_stream_channel[i_stream as usize] = Some(idx);

        if let Err(err) = self.send_open_ack_message(o_stream).await {
            log::warn!("failed to send ack on stream {o_stream}: {err}");
        }
    }

    fn handle_open_ack_message(&mut self, i_stream: u16) {
        let idx = match self.find_channel_by_i_stream(i_stream) {
            Some(idx) => idx,
            None => {
                log::debug!("dropping ack on stream {i_stream}: no channel");
                return;
            }
        };
        match self.channels[idx].state {
            ChannelState::Open => {}
            ChannelState::Connecting => {
                self.channels[idx].state = ChannelState::Open;
            }
            state => {
                log::debug!(
                    "dropping ack on stream {i_stream}: channel {} is in state {state}",
                    self.channels[idx].id
                );
            }
        }
    }

    fn handle_data_message(
        &mut self,
        payload: &Bytes,
        ppid: PayloadProtocolIdentifier,
        i_stream: u16,
    ) -> Option<DataChannelMessage> {
        let idx = match self.find_channel_by_i_stream(i_stream) {
            Some(idx) => idx,
            None => {
                log::debug!("dropping data on stream {i_stream}: no channel");
                return None;
            }
        };
        if self.channels[idx].state == ChannelState::Connecting {
            // implicit ack
            self.channels[idx].state = ChannelState::Open;
        }
        if self.channels[idx].state != ChannelState::Open {
            log::debug!(
                "dropping data on stream {i_stream}: channel {} is in state {}",
                self.channels[idx].id,
                self.channels[idx].state
            );
            return None;
        }
        Some(DataChannelMessage {
            channel_id: self.channels[idx].id,
            is_string: ppid == PayloadProtocolIdentifier::DomString,
            data: payload.clone(),
        })
    }

    async fn handle_message(
        &mut self,
        payload: &Bytes,
        ppid: PayloadProtocolIdentifier,
        i_stream: u16,
    ) -> Option<DataChannelMessage> {
        match ppid {
            PayloadProtocolIdentifier::Control => {
                let mut buf = &payload[..];
                let msg = match Message::unmarshal(&mut buf) {
                    Ok(msg) => msg,
                    Err(err) => {
                        log::debug!(
                            "dropping malformed control message on stream {i_stream}: {err}"
                        );
                        return None;
                    }
                };
                match msg {
                    Message::DataChannelOpenRequest(req) => {
                        self.handle_open_request_message(&req, i_stream).await
                    }
                    Message::DataChannelOpenResponse(rsp) => {
                        self.handle_open_response_message(&rsp, i_stream).await
                    }
                    Message::DataChannelAck(_) => self.handle_open_ack_message(i_stream),
                }
                None
            }
            PayloadProtocolIdentifier::DomString | PayloadProtocolIdentifier::Binary => {
                self.handle_data_message(payload, ppid, i_stream)
            }
            _ => {
                log::debug!(
                    "dropping message of {} bytes with ppid {ppid} on stream {i_stream}",
                    payload.len()
                );
                None
            }
        }
    }

    /// Reconciles channel state with a completed batch of stream resets.
    ///
    /// An incoming reset means the peer closed its side: the incoming
    /// binding is released and, if our outgoing stream is still up, it is
    /// queued for the reciprocal reset. An outgoing reset confirms our own
    /// side went down; once both directions are clear the slot is freed.
    fn handle_stream_reset_event(&mut self, reset: &StreamResetEvent) {
        if reset.denied || reset.failed {
            log::warn!("stream reset denied or failed: {reset:?}");
            return;
        }
        for &stream_id in &reset.stream_ids {
            if reset.incoming {
                if let Some(idx) = self.find_channel_by_i_stream(stream_id) {
                    let i_stream = self.channels[idx].i_stream;
                    self.i_stream_channel[i_stream as usize] = None;
                    self.channels[idx].i_stream = 0;
                    if self.channels[idx].o_stream == 0 {
                        self.channels[idx].clear();
                    } else {
                        let o_stream = self.channels[idx].o_stream;
                        self.reset_outgoing_stream(o_stream);
                        self.channels[idx].state = ChannelState::Closing;
                    }
                }
            }
            if reset.outgoing {
                if let Some(idx) = self.find_channel_by_o_stream(stream_id) {
                    let o_stream = self.channels[idx].o_stream;
                    self.o_stream_channel[o_stream as usize] = None;
                    self.channels[idx].o_stream = 0;
                    if self.channels[idx].i_stream == 0 {
                        self.channels[idx].clear();
                    }
                }
            }
        }
    }

    /// Dispatches the outgoing streams granted by the transport to the
    /// connecting channels still waiting for one.
    async fn handle_stream_change_event(&mut self, change: &StreamChangeEvent) {
        for idx in 0..self.channels.len() {
            if self.channels[idx].state != ChannelState::Connecting
                || self.channels[idx].o_stream != 0
            {
                continue;
            }
            if change.denied || change.failed {
                let i_stream = self.channels[idx].i_stream;
                if i_stream != 0 {
                    self.i_stream_channel[i_stream as usize] = None;
                }
                self.channels[idx].clear();
                continue;
            }
            let o_stream = match self.find_free_o_stream().await {
                Some(o_stream) => o_stream,
                None => break,
            };
            let i_stream = self.channels[idx].i_stream;
            if i_stream != 0 {
                // responder: the peer is still waiting for our response
                match self.send_open_response_message(o_stream, i_stream).await {
                    Ok(_) => {
                        self.channels[idx].o_stream = o_stream;
                        self.o_stream_channel[o_stream as usize] = Some(idx);
                    }
                    Err(err) => {
                        log::warn!("failed to send open response on stream {o_stream}: {err}");
                    }
                }
            } else {
                let (unordered, reliability_type, reliability_value) = {
                    let channel = &self.channels[idx];
                    (
                        channel.unordered,
                        channel.reliability_type,
                        channel.reliability_value,
                    )
                };
                match self
                    .send_open_request_message(
                        o_stream,
                        unordered,
                        reliability_type,
                        reliability_value,
                    )
                    .await
                {
                    Ok(_) => {
                        self.channels[idx].o_stream = o_stream;
                        self.o_stream_channel[o_stream as usize] = Some(idx);
                    }
                    Err(err) => {
                        log::warn!("failed to send open request on stream {o_stream}: {err}");
                        self.channels[idx].clear();
                    }
                }
            }
        }
    }

    async fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::AssociationChange(event) => {
                log::info!(
                    "association change: {}, streams (in/out) = ({}/{})",
                    event.state,
                    event.inbound_streams,
                    event.outbound_streams
                );
                if !event.supported_features.is_empty() {
                    log::info!("association supports {:?}", event.supported_features);
                }
            }
            Notification::PeerAddressChange(event) => {
                log::info!(
                    "peer address {} is now {} (error = {:#010x})",
                    event.address,
                    event.state,
                    event.error
                );
            }
            Notification::RemoteError(event) => {
                log::warn!("remote error {:#06x}: {:02x?}", event.error, &event.data[..]);
            }
            Notification::Shutdown => {
                // Channel records are not reaped here; the subsequent
                // stream resets converge them.
                log::info!("shutdown event");
            }
            Notification::AdaptationIndication { indication } => {
                log::debug!("adaptation indication: {indication:x}");
            }
            Notification::PartialDelivery
            | Notification::Authentication
            | Notification::SenderDry
            | Notification::NotificationsStopped
            | Notification::AssociationReset => {}
            Notification::SendFailed(event) => {
                log::warn!(
                    "{} message with ppid {} on stream {} failed: error = {:#010x}",
                    if event.sent { "sent" } else { "unsent" },
                    event.ppid,
                    event.stream_id,
                    event.error
                );
            }
            Notification::StreamReset(event) => {
                self.handle_stream_reset_event(&event);
                self.send_outgoing_stream_reset().await;
                self.request_more_o_streams().await;
            }
            Notification::StreamChange(event) => {
                self.handle_stream_change_event(&event).await;
                self.send_outgoing_stream_reset().await;
                self.request_more_o_streams().await;
            }
        }
    }

    async fn status(&self) -> Result<Status> {
        let association = self.transport.status().await?;
        let channels = self
            .channels
            .iter()
            .filter(|c| c.state != ChannelState::Closed)
            .map(|c| ChannelInfo {
                id: c.id,
                state: c.state,
                i_stream: c.i_stream,
                o_stream: c.o_stream,
                unordered: c.unordered,
                reliability_type: c.reliability_type,
                reliability_value: c.reliability_value,
            })
            .collect();
        Ok(Status {
            association,
            channels,
        })
    }
}
