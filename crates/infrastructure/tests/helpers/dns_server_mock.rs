use dns_race_infrastructure::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record};
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

/// How the mock upstream answers.
#[derive(Debug, Clone)]
pub enum Behaviour {
    Answer(Vec<IpAddr>),
    Empty,
    NxDomain,
    ServFail,
    Silent,
    /// UDP replies carry TC and no answers; TCP on the same port answers fully.
    Truncated(Vec<IpAddr>),
    WrongId(Vec<IpAddr>),
}

impl Behaviour {
    pub fn answer(addrs: &[&str]) -> Self {
        Self::Answer(addrs.iter().map(|a| a.parse().unwrap()).collect())
    }
}

/// Mock upstream DNS server on 127.0.0.1 with an OS-assigned port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start(behaviour: Behaviour) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let mut tasks = Vec::new();

        if let Behaviour::Truncated(_) = behaviour {
            let listener = TcpListener::bind(addr).await?;
            let behaviour = behaviour.clone();
            tasks.push(tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        continue;
                    }
                    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                    if stream.read_exact(&mut query).await.is_err() {
                        continue;
                    }
                    if let Some(response) = Self::build_response(&query, &behaviour, true) {
                        let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                        framed.extend_from_slice(&response);
                        let _ = stream.write_all(&framed).await;
                    }
                }
            }));
        }

        let counter = Arc::clone(&queries);
        tasks.push(tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(response) = Self::build_response(&buf[..len], &behaviour, false) {
                    let _ = socket.send_to(&response, peer).await;
                }
            }
        }));

        Ok(Self {
            addr,
            queries,
            tasks,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// UDP queries received so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn build_response(query: &[u8], behaviour: &Behaviour, over_tcp: bool) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        for q in request.queries() {
            response.add_query(q.clone());
        }

        let name = request.queries().first()?.name().clone();
        let answers = |response: &mut Message, addrs: &[IpAddr]| {
            for addr in addrs {
                let rdata = match addr {
                    IpAddr::V4(v4) => RData::A(A(*v4)),
                    IpAddr::V6(v6) => RData::AAAA(AAAA(*v6)),
                };
                response.add_answer(Record::from_rdata(name.clone(), 300, rdata));
            }
        };

        match behaviour {
            Behaviour::Silent => return None,
            Behaviour::Answer(addrs) => answers(&mut response, addrs),
            Behaviour::Empty => {}
            Behaviour::NxDomain => {
                response.set_response_code(ResponseCode::NXDomain);
            }
            Behaviour::ServFail => {
                response.set_response_code(ResponseCode::ServFail);
            }
            Behaviour::Truncated(addrs) => {
                if over_tcp {
                    answers(&mut response, addrs);
                } else {
                    response.set_truncated(true);
                }
            }
            Behaviour::WrongId(addrs) => {
                let mut header = *response.header();
                header.set_id(request.id().wrapping_add(1));
                response.set_header(header);
                answers(&mut response, addrs);
            }
        }

        MessageBuilder::encode(&response).ok()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
