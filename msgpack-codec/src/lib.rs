//! A [`numshape_core::TokenSource`] back-end for MessagePack, built on the
//! low-level `rmp` crate rather than `rmp-serde`.
//!
//! `rmp` never decodes a whole value for you -- it reads one `Marker` at a
//! time and leaves the payload bytes for the caller to interpret. Unlike
//! JSON, MessagePack container markers always carry an exact element count,
//! so there is no symmetric "end" token on the wire; this module keeps a
//! small remaining-count stack and synthesizes `MapEnd`/`SeqEnd` itself once
//! a container's count reaches zero.

use std::borrow::Cow;

use numshape_core::{Error, Event, TokenSource};
use rmp::Marker;

#[derive(Debug, Clone, Copy)]
enum Frame {
    Array { remaining: u32 },
    Map { remaining: u32, awaiting_value: bool },
}

/// Drives a MessagePack byte slice as a [`numshape_core::TokenSource`].
pub struct MsgpackTokenSource<'a> {
    buf: &'a [u8],
    stack: Vec<Frame>,
}

impl<'a> MsgpackTokenSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        MsgpackTokenSource {
            buf: data,
            stack: Vec::new(),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.buf.len() < n {
            return Err(Error::Parse(
                "unexpected end of MessagePack input".to_string(),
            ));
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn take_marker(&mut self) -> Result<Marker, Error> {
        rmp::decode::read_marker(&mut self.buf)
            .map_err(|e| Error::Parse(format!("invalid MessagePack marker: {e:?}")))
    }

    fn read_str(&mut self, len: u32) -> Result<Event<'a>, Error> {
        let bytes = self.take(len as usize)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|e| Error::Parse(format!("invalid utf-8 in MessagePack string: {e}")))?;
        Ok(Event::Str(Cow::Borrowed(s)))
    }

    fn read_value(&mut self, marker: Marker) -> Result<Event<'a>, Error> {
        match marker {
            Marker::Null => Ok(Event::Null),
            Marker::True => Ok(Event::Bool(true)),
            Marker::False => Ok(Event::Bool(false)),
            Marker::FixPos(n) => Ok(Event::UInt(u64::from(n))),
            Marker::FixNeg(n) => Ok(Event::Int(i64::from(n))),
            Marker::U8 => Ok(Event::UInt(u64::from(self.take(1)?[0]))),
            Marker::U16 => Ok(Event::UInt(u64::from(u16::from_be_bytes(
                self.take(2)?.try_into().unwrap(),
            )))),
            Marker::U32 => Ok(Event::UInt(u64::from(u32::from_be_bytes(
                self.take(4)?.try_into().unwrap(),
            )))),
            Marker::U64 => Ok(Event::UInt(u64::from_be_bytes(
                self.take(8)?.try_into().unwrap(),
            ))),
            Marker::I8 => Ok(Event::Int(i64::from(self.take(1)?[0] as i8))),
            Marker::I16 => Ok(Event::Int(i64::from(i16::from_be_bytes(
                self.take(2)?.try_into().unwrap(),
            )))),
            Marker::I32 => Ok(Event::Int(i64::from(i32::from_be_bytes(
                self.take(4)?.try_into().unwrap(),
            )))),
            Marker::I64 => Ok(Event::Int(i64::from_be_bytes(
                self.take(8)?.try_into().unwrap(),
            ))),
            Marker::F32 => Ok(Event::Float(f64::from(f32::from_be_bytes(
                self.take(4)?.try_into().unwrap(),
            )))),
            Marker::F64 => Ok(Event::Float(f64::from_be_bytes(
                self.take(8)?.try_into().unwrap(),
            ))),
            Marker::FixStr(len) => self.read_str(u32::from(len)),
            Marker::Str8 => {
                let len = u32::from(self.take(1)?[0]);
                self.read_str(len)
            }
            Marker::Str16 => {
                let len = u32::from(u16::from_be_bytes(self.take(2)?.try_into().unwrap()));
                self.read_str(len)
            }
            Marker::Str32 => {
                let len = u32::from_be_bytes(self.take(4)?.try_into().unwrap());
                self.read_str(len)
            }
            Marker::FixArray(len) => self.start_array(u32::from(len)),
            Marker::Array16 => {
                let len = u32::from(u16::from_be_bytes(self.take(2)?.try_into().unwrap()));
                self.start_array(len)
            }
            Marker::Array32 => {
                let len = u32::from_be_bytes(self.take(4)?.try_into().unwrap());
                self.start_array(len)
            }
            Marker::FixMap(len) => self.start_map(u32::from(len)),
            Marker::Map16 => {
                let len = u32::from(u16::from_be_bytes(self.take(2)?.try_into().unwrap()));
                self.start_map(len)
            }
            Marker::Map32 => {
                let len = u32::from_be_bytes(self.take(4)?.try_into().unwrap());
                self.start_map(len)
            }
            other => Err(Error::NotImplemented(format!(
                "unsupported MessagePack marker: {other:?}"
            ))),
        }
    }

    fn start_array(&mut self, len: u32) -> Result<Event<'a>, Error> {
        self.stack.push(Frame::Array { remaining: len });
        Ok(Event::SeqStart(Some(len as usize)))
    }

    fn start_map(&mut self, len: u32) -> Result<Event<'a>, Error> {
        self.stack.push(Frame::Map {
            remaining: len,
            awaiting_value: false,
        });
        Ok(Event::MapStart(Some(len as usize)))
    }
}

impl<'a> TokenSource<'a> for MsgpackTokenSource<'a> {
    type Error = Error;

    fn next_event(&mut self) -> Result<Event<'a>, Error> {
        let Some(frame) = self.stack.last().copied() else {
            let marker = self.take_marker()?;
            return self.read_value(marker);
        };

        match frame {
            Frame::Array { remaining: 0 } => {
                self.stack.pop();
                Ok(Event::SeqEnd)
            }
            Frame::Array { .. } => {
                if let Some(Frame::Array { remaining }) = self.stack.last_mut() {
                    *remaining -= 1;
                }
                let marker = self.take_marker()?;
                self.read_value(marker)
            }
            Frame::Map { remaining: 0, .. } => {
                self.stack.pop();
                Ok(Event::MapEnd)
            }
            Frame::Map {
                awaiting_value: true,
                ..
            } => {
                if let Some(Frame::Map {
                    remaining,
                    awaiting_value,
                }) = self.stack.last_mut()
                {
                    *remaining -= 1;
                    *awaiting_value = false;
                }
                let marker = self.take_marker()?;
                self.read_value(marker)
            }
            Frame::Map {
                awaiting_value: false,
                ..
            } => {
                let marker = self.take_marker()?;
                let key_event = self.read_value(marker)?;
                let Event::Str(key) = key_event else {
                    return Err(Error::Parse(
                        "MessagePack map key must be a string".to_string(),
                    ));
                };
                if let Some(Frame::Map { awaiting_value, .. }) = self.stack.last_mut() {
                    *awaiting_value = true;
                }
                Ok(Event::MapKey(key))
            }
        }
    }

    fn finish(&mut self) -> Result<(), Error> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(Error::Parse(
                "trailing bytes after MessagePack document".to_string(),
            ))
        }
    }
}
