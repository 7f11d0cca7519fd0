//! Result streams returned by repositories.

use futures::future;
use futures::stream::{BoxStream, Stream, StreamExt};
use query_engine_metadata::metadata::Record;

use crate::error::Error;

/// A cold stream of records. Nothing runs until it is first polled, and it
/// ends right after the first error it yields.
pub type RecordStream = BoxStream<'static, Result<Record, Error>>;

/// End `stream` right after the first error it yields.
pub fn stop_after_error<S, T>(stream: S) -> impl Stream<Item = Result<T, Error>>
where
    S: Stream<Item = Result<T, Error>>,
{
    stream.scan(false, |failed, item| {
        if *failed {
            return future::ready(None);
        }
        *failed = item.is_err();
        future::ready(Some(item))
    })
}
