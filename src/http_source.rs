use super::*;

pub(crate) struct HttpSource {
  base_url: String,
  client: reqwest::Client,
}

impl HttpSource {
  async fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|error| Error::fetch(url, &error))?;

    let status = response.status();

    if status == StatusCode::NOT_FOUND {
      return Ok(None);
    }

    if !status.is_success() {
      return Err(Error::status(url, status));
    }

    let body = response
      .bytes()
      .await
      .map_err(|error| Error::fetch(url, &error))?;

    Ok(Some(body.to_vec()))
  }

  fn ids_url(&self, endpoint: &str) -> String {
    format!("{}/{endpoint}.json", self.base_url)
  }

  fn item_url(&self, id: u64) -> String {
    format!("{}/item/{id}.json", self.base_url)
  }

  pub(crate) fn new(config: &Config) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.request_timeout_secs))
      .user_agent(USER_AGENT)
      .build()
      .map_err(|error| Error::fetch(&config.api_base_url, &error))?;

    Ok(Self {
      base_url: config.api_base_url.trim_end_matches('/').to_string(),
      client,
    })
  }
}

#[async_trait]
impl Source for HttpSource {
  async fn fetch_ids(&self, endpoint: &str) -> Result<Option<Vec<u64>>> {
    let url = self.ids_url(endpoint);

    let Some(body) = self.get(&url).await? else {
      return Ok(None);
    };

    serde_json::from_slice::<Option<Vec<u64>>>(&body)
      .map_err(|source| Error::Decode { url, source })
  }

  async fn fetch_item(&self, id: u64) -> Result<Option<ItemRecord>> {
    let url = self.item_url(id);

    let Some(body) = self.get(&url).await? else {
      return Ok(None);
    };

    match serde_json::from_slice::<Option<ItemRecord>>(&body) {
      Ok(record) => Ok(record),
      Err(error) => {
        warn!(%error, id, "treating undecodable item as absent");
        Ok(None)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    tokio::{
      io::{AsyncReadExt, AsyncWriteExt},
      net::TcpListener,
    },
  };

  async fn serve(status: &'static str, body: &'static str) -> HttpSource {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
      loop {
        let Ok((mut stream, _)) = listener.accept().await else {
          return;
        };

        let mut request = Vec::new();
        let mut buffer = [0; 1024];

        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
          let Ok(read) = stream.read(&mut buffer).await else {
            break;
          };

          if read == 0 {
            break;
          }

          request.extend_from_slice(&buffer[..read]);
        }

        let response = format!(
          "HTTP/1.1 {status}\r\n\
           content-type: application/json\r\n\
           content-length: {}\r\n\
           connection: close\r\n\r\n{body}",
          body.len()
        );

        stream.write_all(response.as_bytes()).await.ok();
        stream.shutdown().await.ok();
      }
    });

    HttpSource::new(&Config {
      api_base_url: format!("http://{addr}"),
      ..Config::default()
    })
    .unwrap()
  }

  #[tokio::test]
  async fn not_found_is_absent() {
    let source = serve("404 Not Found", "").await;

    assert!(source.fetch_item(1).await.unwrap().is_none());
    assert!(source.fetch_ids("topstories").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn server_error_is_a_transient_fetch_error() {
    let source = serve("500 Internal Server Error", "").await;

    let error = source.fetch_item(1).await.unwrap_err();

    assert!(
      matches!(error, Error::Fetch { status: Some(500), .. }),
      "{error:?}"
    );
    assert!(error.is_transient());
  }

  #[tokio::test]
  async fn null_body_is_absent() {
    let source = serve("200 OK", "null").await;

    assert!(source.fetch_item(1).await.unwrap().is_none());
    assert!(source.fetch_ids("topstories").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn undecodable_item_is_absent() {
    let source = serve("200 OK", r#"{"id":"not a number"}"#).await;

    assert!(source.fetch_item(1).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn ids_that_are_not_an_array_fail_to_decode() {
    let source = serve("200 OK", r#"{"ids":[1,2]}"#).await;

    let error = source.fetch_ids("topstories").await.unwrap_err();

    assert!(matches!(error, Error::Decode { .. }), "{error:?}");
    assert!(!error.is_transient());
  }

  #[tokio::test]
  async fn ids_are_decoded_in_order() {
    let source = serve("200 OK", "[3,1,2]").await;

    assert_eq!(
      source.fetch_ids("topstories").await.unwrap(),
      Some(vec![3, 1, 2])
    );
  }

  #[test]
  fn urls_are_built_from_base_url() {
    let source = HttpSource::new(&Config {
      api_base_url: "https://hacker-news.firebaseio.com/v0/".into(),
      ..Config::default()
    })
    .unwrap();

    assert_eq!(
      source.ids_url("topstories"),
      "https://hacker-news.firebaseio.com/v0/topstories.json"
    );

    assert_eq!(
      source.item_url(8863),
      "https://hacker-news.firebaseio.com/v0/item/8863.json"
    );
  }
}
