use geodns_infrastructure::dns::forwarding::{ClientSubnetCodec, MessageBuilder};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};

/// How the mock server answers over UDP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpMode {
    Answer,
    Truncate,
    Silent,
}

/// Local authoritative server answering every A query with `answer`,
/// echoing any client-subnet option back with a /24 scope.
pub struct MockDnsServer {
    pub addr: SocketAddr,
}

impl MockDnsServer {
    pub async fn start(answer: Ipv4Addr, mode: UdpMode) -> Self {
        let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = tcp.local_addr().unwrap();
        let udp = UdpSocket::bind(addr).await.unwrap();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                let Ok((len, peer)) = udp.recv_from(&mut buf).await else {
                    break;
                };
                if mode == UdpMode::Silent {
                    continue;
                }
                let response = build_response(&buf[..len], answer, mode == UdpMode::Truncate);
                let _ = udp.send_to(&response, peer).await;
            }
        });

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = tcp.accept().await else {
                    break;
                };
                let mut len = [0u8; 2];
                if stream.read_exact(&mut len).await.is_err() {
                    continue;
                }
                let mut query = vec![0u8; u16::from_be_bytes(len) as usize];
                if stream.read_exact(&mut query).await.is_err() {
                    continue;
                }
                let response = build_response(&query, answer, false);
                let _ = stream
                    .write_all(&(response.len() as u16).to_be_bytes())
                    .await;
                let _ = stream.write_all(&response).await;
            }
        });

        Self { addr }
    }
}

fn build_response(query_bytes: &[u8], answer: Ipv4Addr, truncated: bool) -> Vec<u8> {
    let query = Message::from_vec(query_bytes).unwrap();
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_response_code(ResponseCode::NoError)
        .set_truncated(truncated);
    response.add_queries(query.queries().to_vec());

    if !truncated {
        let name = query.queries()[0].name().clone();
        response.add_answer(Record::from_rdata(name, 120, RData::A(A(answer))));
    }

    if let Some(subnet) = query.extensions().as_ref().and_then(ClientSubnetCodec::unpack) {
        let scoped = geodns_domain::ClientSubnet::new(subnet.address, subnet.source_prefix, 24)
            .unwrap();
        *response.extensions_mut() = Some(ClientSubnetCodec::pack(&scoped));
    }

    MessageBuilder::serialize_message(&response).unwrap()
}
