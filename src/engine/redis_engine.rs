use redis::{Client, Commands, Connection, ConnectionInfo, IntoConnectionInfo};
use tracing::{debug, info, instrument};

use super::StoreEngine;
use crate::error::Result;

/// The default redis url, local server, database index 0
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

/// A [`StoreEngine`] backed by a synchronous connection to a redis server.
///
/// The database index in the connection url selects the namespace that
/// [`StoreEngine::flush_db`] clears.
pub struct RedisEngine {
    conn: Connection,
}

impl RedisEngine {
    /// opens a connection to the redis server at `url`, e.g. `redis://127.0.0.1:6379/0`
    ///
    /// # Errors
    /// returns [`CacheError::Redis`] if the url is malformed or the server can not be reached
    ///
    /// [`CacheError::Redis`]: ../enum.CacheError.html
    #[instrument(skip(url))]
    pub fn open(url: &str) -> Result<RedisEngine> {
        let conn_info = url.into_connection_info()?;
        let target = describe(&conn_info);
        let client = Client::open(conn_info)?;
        let conn = client.get_connection()?;
        info!("connected to redis at {}", target);
        Ok(RedisEngine { conn })
    }
}

/// the server address and database index of a connection, leaving out any credentials
fn describe(info: &ConnectionInfo) -> String {
    format!("{}/{}", info.addr, info.redis.db)
}

impl StoreEngine for RedisEngine {
    #[instrument(skip(self))]
    fn flush_db(&mut self) -> Result<()> {
        redis::cmd("FLUSHDB").query::<()>(&mut self.conn)?;
        debug!("FLUSHDB ok");
        Ok(())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.conn.get(key)?)
    }

    fn incr(&mut self, key: &str) -> Result<i64> {
        Ok(self.conn.incr(key, 1_i64)?)
    }

    fn rpush(&mut self, key: &str, value: &[u8]) -> Result<u64> {
        Ok(self.conn.rpush(key, value)?)
    }

    fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        Ok(self.conn.lrange(key, start, stop)?)
    }
}
