// Domain models: inbound AWS payloads, raw datapoints, outbound Slack messages

mod alarm;
mod codedeploy;
mod datapoint;
mod slack;
mod sns;

pub use alarm::{CloudwatchAlarm, Dimension, Trigger};
pub use codedeploy::CodedeployEvent;
pub use datapoint::{RawDatapoint, Statistic};
pub use slack::{Attachment, Block, SlackMessage, TextObject};
pub use sns::{SnsEnvelope, SnsMessageType};
