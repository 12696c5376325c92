use super::{Card, DEFAULT_AVATAR};

const FONT_IMPORTS: &str = "\
      @import url('https://fonts.googleapis.com/css2?family=ZCOOL+KuaiLe&family=Noto+Sans+SC:wght@400;500;700&family=Noto+Serif+SC:wght@400;700&family=LXGW+WenKai&family=ZCOOL+XiaoWei&family=ZCOOL+QingKe+HuangYou&family=Ma+Shan+Zheng&family=Zhi+Mang+Xing&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Roboto:wght@400;500;700&family=Poppins:wght@400;500;600&family=Open+Sans:wght@400;600&family=Inter:wght@400;500;600&family=Montserrat:wght@400;500;600&family=Lato:wght@400;700&family=Source+Sans+Pro:wght@400;600&family=Ubuntu:wght@400;500&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Fira+Sans:wght@400;500;600&family=IBM+Plex+Sans:wght@400;500;600&family=Nunito+Sans:wght@400;600;700&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Josefin+Sans:wght@400;500;600&family=Raleway:wght@400;500;600&family=Work+Sans:wght@400;500;600&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Manrope:wght@400;500;600&family=DM+Sans:wght@400;500;700&family=Space+Grotesk:wght@400;500;600&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Noto+Sans+Arabic:wght@400;500;700&family=Noto+Kufi+Arabic:wght@400;500;700&family=Amiri:wght@400;700&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Noto+Sans+KR:wght@400;500;700&family=Nanum+Gothic:wght@400;700&family=Nanum+Myeongjo:wght@400;700&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Noto+Sans+Vietnamese:wght@400;500;700&family=Be+Vietnam+Pro:wght@400;500;600&display=swap');
      @import url('https://fonts.googleapis.com/css2?family=Noto+Sans:wght@400;500;700&family=PT+Sans:wght@400;700&display=swap');";

// Card as an embeddable html fragment (style block + card div)
pub fn render(card: &Card) -> String {
    let Card {
        name,
        specialty,
        display_link,
        redirect_link,
        style,
        ..
    } = card;
    let bgcolor = &style.bgcolor;
    let textcolor = &style.textcolor;
    let linkcolor = &style.linkcolor;
    let font = &style.font;
    let avatar_url = card.avatar_url();

    format!(
        r#"
    <style>
{FONT_IMPORTS}

      * {{
        box-sizing: border-box;
        margin: 0;
        padding: 0;
      }}

      body {{
        display: flex;
        justify-content: center;
        align-items: center;
        min-height: 100vh;
        margin: 0;
        padding: 16px;
      }}

      .card {{
        display: flex;
        align-items: center;
        border: 2px solid #e2e8f0;
        border-radius: 20px;
        padding: 20px;
        background: {bgcolor};
        box-shadow: 0 8px 16px rgba(0,0,0,0.1);
        transition: transform 0.3s, box-shadow 0.3s;
        width: 100%;
        max-width: 600px;
        gap: 20px;
      }}

      .card:hover {{
        transform: translateY(-5px);
        box-shadow: 0 12px 24px rgba(0,0,0,0.2);
      }}

      .avatar {{
        flex-shrink: 0;
        width: 80px;
        height: 80px;
        display: flex;
        align-items: center;
        justify-content: center;
      }}

      .avatar img {{
        width: 80px;
        height: 80px;
        border-radius: 50%;
        box-shadow: 0 4px 8px rgba(0,0,0,0.1);
        object-fit: cover;
      }}

      .content {{
        flex: 1;
        min-width: 0;
        display: flex;
        flex-direction: column;
        justify-content: center;
      }}

      .content h3 {{
        margin: 0 0 10px 0;
        font-size: 1.6em;
        color: #1f2937;
        word-wrap: break-word;
      }}

      .content p {{
        margin: 0 0 10px 0;
        color: {textcolor};
        font-size: 1em;
        line-height: 1.5;
        font-family: '{font}', sans-serif;
        word-wrap: break-word;
      }}

      .content a {{
        color: {linkcolor};
        text-decoration: none;
        font-weight: 500;
        transition: color 0.3s;
        display: block;
        word-wrap: break-word;
        word-break: break-all;
      }}

      .content a:hover {{
        color: {linkcolor}dd;
      }}

      @media (max-width: 480px) {{
        .card {{
          padding: 16px;
        }}

        .avatar {{
          width: 60px;
          height: 60px;
        }}

        .avatar img {{
          width: 60px;
          height: 60px;
        }}

        .content h3 {{
          font-size: 1.4em;
        }}

        .content p {{
          font-size: 0.95em;
        }}
      }}
    </style>
    <div class="card">
      <div class="avatar">
        <img src="{avatar_url}" alt="{name}'s avatar" onerror="this.onerror=null;this.src='{DEFAULT_AVATAR}';">
      </div>
      <div class="content">
        <h3>{name}</h3>
        <p>✨{specialty}✨</p>
        <a href="{redirect_link}" target="_blank">{display_link}</a>
      </div>
    </div>
  "#
    )
}
